use std::io;

use axum::Json;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, State};
use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::UploadSource;
use crate::application::services::TranscribeError;
use crate::presentation::state::AppState;

use super::error::ApiError;

const DEFAULT_FILENAME: &str = "upload";
const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// Streams a multipart file field straight to disk.
struct MultipartSource<'a> {
    field: Field<'a>,
}

#[async_trait::async_trait]
impl UploadSource for MultipartSource<'_> {
    async fn rewind(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "multipart fields are read once",
        ))
    }

    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        self.field.chunk().await.map_err(io::Error::other)
    }
}

/// The upload is the field named `file`, or failing that the first field carrying a filename.
fn is_file_field(field: &Field<'_>) -> bool {
    field.name() == Some(FILE_FIELD) || field.file_name().is_some()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected multipart request");
        TranscribeError::InvalidInput(format!(
            "invalid multipart request: {}",
            rejection.body_text()
        ))
    })?;

    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if is_file_field(&f) => break f,
            Ok(Some(f)) => {
                tracing::debug!(field = ?f.name(), "Skipping non-file form field");
            }
            Ok(None) => {
                tracing::warn!("Transcribe request with no file");
                return Err(
                    TranscribeError::InvalidInput("no file was uploaded".to_string()).into(),
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(TranscribeError::InvalidInput(format!(
                    "failed to read multipart: {}",
                    e
                ))
                .into());
            }
        }
    };

    let filename = field
        .file_name()
        .unwrap_or(DEFAULT_FILENAME)
        .to_string();

    tracing::debug!(filename = %filename, content_type = ?field.content_type(), "Processing audio upload");

    let mut source = MultipartSource { field };
    let transcript = state
        .transcription_service
        .transcribe_upload(&filename, &mut source)
        .await?;

    Ok(Json(TranscribeResponse {
        transcript: transcript.into_string(),
    }))
}
