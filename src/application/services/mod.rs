mod transcription_service;
mod upload_validator;

pub use transcription_service::{TranscribeError, TranscriptionService};
pub use upload_validator::{DEFAULT_MIN_UPLOAD_BYTES, UploadValidator};
