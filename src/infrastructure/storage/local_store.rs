use std::path::{Path, PathBuf};

use bytes::{Buf, BytesMut};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{UploadSource, UploadStore, UploadStoreError};
use crate::domain::StoredFile;

/// Disk writes are issued in blocks of this size.
pub const WRITE_CHUNK_SIZE: usize = 1024 * 1024;

pub struct LocalUploadStore {
    base_path: PathBuf,
}

impl LocalUploadStore {
    pub fn new(base_path: PathBuf) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    fn upload_dir(&self) -> &Path {
        &self.base_path
    }

    async fn store(
        &self,
        file: &StoredFile,
        source: &mut dyn UploadSource,
    ) -> Result<u64, UploadStoreError> {
        if let Err(e) = source.rewind().await {
            tracing::debug!(error = %e, "Upload source is not rewindable, reading from current position");
        }

        let mut out = File::create(file.path()).await?;
        let mut pending = BytesMut::with_capacity(WRITE_CHUNK_SIZE);
        let mut total_bytes: u64 = 0;

        while let Some(mut chunk) = source.next_chunk().await.map_err(UploadStoreError::Source)? {
            while chunk.has_remaining() {
                let take = (WRITE_CHUNK_SIZE - pending.len()).min(chunk.remaining());
                pending.extend_from_slice(&chunk.split_to(take));

                if pending.len() == WRITE_CHUNK_SIZE {
                    out.write_all(&pending).await?;
                    total_bytes += pending.len() as u64;
                    pending.clear();
                }
            }
        }

        if !pending.is_empty() {
            out.write_all(&pending).await?;
            total_bytes += pending.len() as u64;
        }

        out.flush().await?;

        Ok(total_bytes)
    }
}
