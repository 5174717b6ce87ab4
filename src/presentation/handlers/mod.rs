mod error;
mod health;
mod transcribe;

pub use error::{ApiError, ErrorResponse};
pub use health::{HealthResponse, health_handler};
pub use transcribe::{TranscribeResponse, transcribe_handler};
