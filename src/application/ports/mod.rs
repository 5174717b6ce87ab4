mod audio_normalizer;
mod speech_engine;
mod upload_store;

pub use audio_normalizer::{AudioNormalizer, NormalizeError};
pub use speech_engine::{
    DEFAULT_BEAM_SIZE, DEFAULT_MIN_SILENCE_MS, DecodeOptions, SpeechEngine, Transcription,
    TranscriptionError, TranscriptionInfo,
};
pub use upload_store::{UploadSource, UploadStore, UploadStoreError};
