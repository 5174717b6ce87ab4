use std::io;
use std::path::Path;

use bytes::Bytes;

use crate::domain::StoredFile;

/// A forward-only byte source for an inbound upload.
#[async_trait::async_trait]
pub trait UploadSource: Send {
    /// Moves back to the first byte. Sources that cannot seek return an error.
    async fn rewind(&mut self) -> io::Result<()>;

    /// Next block of bytes, or `None` once the source is exhausted.
    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>>;
}

#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    fn upload_dir(&self) -> &Path;

    /// Persists `source` at `file` and returns the number of bytes written.
    async fn store(
        &self,
        file: &StoredFile,
        source: &mut dyn UploadSource,
    ) -> Result<u64, UploadStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("failed to read upload: {0}")]
    Source(io::Error),
    #[error("failed to write upload: {0}")]
    Io(#[from] io::Error),
}
