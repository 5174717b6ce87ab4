mod stored_file;
mod transcript;
mod upload_id;

pub use stored_file::{StoredFile, normalized_path_for, sanitize_filename};
pub use transcript::{Transcript, TranscriptSegment};
pub use upload_id::UploadId;
