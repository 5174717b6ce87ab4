use std::sync::Arc;

use crate::application::services::TranscriptionService;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    /// Request body cap for uploads, in bytes.
    pub max_upload_bytes: usize,
}
