use std::sync::Arc;

use crate::application::ports::AudioNormalizer;
use crate::presentation::config::{AudioSettings, NormalizerSetting};

use super::ffmpeg_normalizer::{FfmpegAudioNormalizer, check_ffmpeg_binary};
use super::native_normalizer::NativeAudioNormalizer;

pub struct AudioNormalizerFactory;

impl AudioNormalizerFactory {
    pub fn create(settings: &AudioSettings) -> Arc<dyn AudioNormalizer> {
        match settings.normalizer {
            NormalizerSetting::Ffmpeg => {
                if let Err(e) = check_ffmpeg_binary() {
                    tracing::warn!(error = %e, "ffmpeg is unavailable, uploads will be rejected until it is installed");
                }
                Arc::new(FfmpegAudioNormalizer)
            }
            NormalizerSetting::Native => Arc::new(NativeAudioNormalizer),
        }
    }
}
