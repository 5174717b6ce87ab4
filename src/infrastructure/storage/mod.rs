mod local_store;
mod upload_sources;

pub use local_store::{LocalUploadStore, WRITE_CHUNK_SIZE};
pub use upload_sources::{ReaderSource, StreamSource};
