mod ffmpeg_normalizer;
mod model_resolver;
mod native_normalizer;
mod normalizer_factory;
mod whisper_engine;

pub const TARGET_SAMPLE_RATE: u32 = 16_000;
pub const TARGET_CHANNELS: u16 = 1;

pub use ffmpeg_normalizer::{FfmpegAudioNormalizer, check_ffmpeg_binary};
pub use model_resolver::{
    ModelResolver, VAD_MODEL_FILE, VAD_MODEL_REPO, WHISPER_MODEL_REPO, model_file_name,
};
pub use native_normalizer::{NativeAudioNormalizer, decode_to_mono};
pub use normalizer_factory::AudioNormalizerFactory;
pub use whisper_engine::{WhisperEngine, read_canonical_wav};
