use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Re-encodes arbitrary audio into mono, 16 kHz, 16-bit PCM WAV.
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    /// Returns the path of the canonical WAV derived from `input`.
    async fn normalize(&self, input: &Path) -> Result<PathBuf, NormalizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("audio decoder is not available: {0}")]
    DecoderMissing(String),
    #[error("audio encoding failed: {0}")]
    EncodingFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl NormalizeError {
    /// Whether the failure is attributable to the uploaded content.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::DecodingFailed(_) | Self::DecoderMissing(_))
    }
}
