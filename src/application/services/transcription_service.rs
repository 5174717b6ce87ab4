use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    AudioNormalizer, DecodeOptions, NormalizeError, SpeechEngine, TranscriptionError,
    UploadSource, UploadStore, UploadStoreError,
};
use crate::domain::{StoredFile, Transcript, UploadId};

use super::UploadValidator;

/// Outcome classes the HTTP boundary distinguishes.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Internal(String),
}

impl From<UploadStoreError> for TranscribeError {
    fn from(e: UploadStoreError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<NormalizeError> for TranscribeError {
    fn from(e: NormalizeError) -> Self {
        if e.is_invalid_input() {
            Self::InvalidInput(e.to_string())
        } else {
            Self::Internal(e.to_string())
        }
    }
}

impl From<TranscriptionError> for TranscribeError {
    fn from(e: TranscriptionError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Runs one upload through store, validate, normalize and transcribe.
pub struct TranscriptionService {
    store: Arc<dyn UploadStore>,
    validator: UploadValidator,
    normalizer: Arc<dyn AudioNormalizer>,
    engine: Arc<dyn SpeechEngine>,
    options: DecodeOptions,
}

impl TranscriptionService {
    pub fn new(
        store: Arc<dyn UploadStore>,
        validator: UploadValidator,
        normalizer: Arc<dyn AudioNormalizer>,
        engine: Arc<dyn SpeechEngine>,
        options: DecodeOptions,
    ) -> Self {
        Self {
            store,
            validator,
            normalizer,
            engine,
            options,
        }
    }

    #[tracing::instrument(skip(self, source), fields(upload_id = tracing::field::Empty))]
    pub async fn transcribe_upload(
        &self,
        filename: &str,
        source: &mut dyn UploadSource,
    ) -> Result<Transcript, TranscribeError> {
        let file = StoredFile::new(self.store.upload_dir(), UploadId::new(), filename);
        tracing::Span::current().record("upload_id", tracing::field::display(file.id()));

        let written = self.store.store(&file, source).await?;
        tracing::debug!(bytes = written, path = %file, "Upload stored");

        self.validator.validate(file.path()).await?;

        let normalized = self.normalizer.normalize(file.path()).await?;
        tracing::debug!(path = %normalized.display(), "Audio normalized");

        self.transcribe(&normalized).await
    }

    /// Runs the engine on a blocking thread and assembles the transcript there.
    pub async fn transcribe(&self, audio: &Path) -> Result<Transcript, TranscribeError> {
        let engine = Arc::clone(&self.engine);
        let options = self.options.clone();
        let audio = audio.to_path_buf();

        let transcript = tokio::task::spawn_blocking(move || {
            let transcription = engine.transcribe(&audio, &options)?;
            tracing::debug!(
                language = ?transcription.info.language,
                duration_secs = transcription.info.duration_secs,
                "Inference finished"
            );
            Ok::<_, TranscriptionError>(Transcript::from_segments(transcription.segments))
        })
        .await
        .map_err(|e| TranscribeError::Internal(format!("transcription task failed: {e}")))??;

        tracing::info!(chars = transcript.as_str().len(), "Audio transcription completed");

        Ok(transcript)
    }
}
