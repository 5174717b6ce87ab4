use std::path::Path;

use super::TranscribeError;

/// Smallest upload worth decoding. A guard against empty or truncated
/// bodies, not a validity check.
pub const DEFAULT_MIN_UPLOAD_BYTES: u64 = 1024;

#[derive(Debug, Clone, Copy)]
pub struct UploadValidator {
    min_bytes: u64,
}

impl UploadValidator {
    pub fn new(min_bytes: u64) -> Self {
        Self { min_bytes }
    }

    pub fn min_bytes(&self) -> u64 {
        self.min_bytes
    }

    /// Returns the file size when it meets the minimum.
    pub async fn validate(&self, path: &Path) -> Result<u64, TranscribeError> {
        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| TranscribeError::Internal(format!("failed to stat upload: {e}")))?
            .len();

        if size < self.min_bytes {
            tracing::warn!(size, min_bytes = self.min_bytes, "Rejecting undersized upload");
            return Err(TranscribeError::InvalidInput(format!(
                "uploaded file is too small ({} bytes, minimum is {} bytes)",
                size, self.min_bytes
            )));
        }

        Ok(size)
    }
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_UPLOAD_BYTES)
    }
}
