use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::TranscribeError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// The one place pipeline failures become status codes.
#[derive(Debug)]
pub struct ApiError(pub TranscribeError);

impl From<TranscribeError> for ApiError {
    fn from(e: TranscribeError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            TranscribeError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            TranscribeError::Internal(msg) => {
                tracing::error!(error = %msg, "Transcription request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
