use std::path::Path;

use crate::domain::TranscriptSegment;

pub const DEFAULT_BEAM_SIZE: u32 = 5;
pub const DEFAULT_MIN_SILENCE_MS: u32 = 500;

/// Converts canonical audio into an ordered sequence of segments.
///
/// Calls block for the whole inference run; async callers should move them
/// onto a blocking thread.
pub trait SpeechEngine: Send + Sync {
    fn transcribe(
        &self,
        audio: &Path,
        options: &DecodeOptions,
    ) -> Result<Transcription, TranscriptionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    pub beam_size: u32,
    pub vad_filter: bool,
    pub min_silence_duration_ms: u32,
    /// `None` lets the engine detect the spoken language.
    pub language: Option<String>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            beam_size: DEFAULT_BEAM_SIZE,
            vad_filter: true,
            min_silence_duration_ms: DEFAULT_MIN_SILENCE_MS,
            language: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptionInfo {
    pub language: Option<String>,
    pub duration_secs: f32,
}

pub struct Transcription {
    pub segments: Box<dyn Iterator<Item = TranscriptSegment>>,
    pub info: TranscriptionInfo,
}

impl Transcription {
    pub fn new<I>(segments: I, info: TranscriptionInfo) -> Self
    where
        I: Iterator<Item = TranscriptSegment> + 'static,
    {
        Self {
            segments: Box::new(segments),
            info,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error(
        "speech engine unavailable: {0} (check that the audio and inference runtime libraries are installed)"
    )]
    EngineUnavailable(String),
    #[error("canonical audio could not be read: {0}")]
    AudioUnreadable(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
