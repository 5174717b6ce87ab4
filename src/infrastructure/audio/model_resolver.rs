use std::path::PathBuf;

use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};

use crate::application::ports::TranscriptionError;
use crate::presentation::config::{ComputePrecision, ModelSize};

pub const WHISPER_MODEL_REPO: &str = "ggerganov/whisper.cpp";
pub const VAD_MODEL_REPO: &str = "ggml-org/whisper-vad";
pub const VAD_MODEL_FILE: &str = "ggml-silero-v5.1.2.bin";

/// GGML file name for a size/precision pair, as published by whisper.cpp.
///
/// large-v3 has no q8_0 upload, so int8 falls back to its q5_0 weights.
pub fn model_file_name(size: ModelSize, precision: ComputePrecision) -> String {
    let suffix = match (size, precision) {
        (ModelSize::Large, ComputePrecision::Int8) => "-q5_0",
        (_, ComputePrecision::Int8) => "-q8_0",
        (_, ComputePrecision::Float16) => "",
        (_, ComputePrecision::Float32) => "-f32",
    };
    format!("ggml-{}{}.bin", size.ggml_name(), suffix)
}

/// Finds model weights locally, falling back to the Hugging Face hub.
pub struct ModelResolver {
    model_dir: PathBuf,
    download: bool,
}

impl ModelResolver {
    pub fn new(model_dir: impl Into<PathBuf>, download: bool) -> Self {
        Self {
            model_dir: model_dir.into(),
            download,
        }
    }

    pub fn resolve_whisper(
        &self,
        size: ModelSize,
        precision: ComputePrecision,
    ) -> Result<PathBuf, TranscriptionError> {
        let file = model_file_name(size, precision);
        // whisper.cpp does not publish f32 weights
        let hosted = precision != ComputePrecision::Float32;
        self.resolve(WHISPER_MODEL_REPO, &file, hosted)
    }

    pub fn resolve_vad(&self) -> Result<PathBuf, TranscriptionError> {
        self.resolve(VAD_MODEL_REPO, VAD_MODEL_FILE, true)
    }

    fn resolve(
        &self,
        repo_id: &str,
        file: &str,
        hosted: bool,
    ) -> Result<PathBuf, TranscriptionError> {
        let local = self.model_dir.join(file);
        if local.is_file() {
            tracing::debug!(path = %local.display(), "Using local model file");
            return Ok(local);
        }

        if !self.download || !hosted {
            return Err(TranscriptionError::ModelLoadFailed(format!(
                "{} not found (download disabled or not hosted in {})",
                local.display(),
                repo_id
            )));
        }

        tracing::info!(repo = repo_id, file, "Fetching model from Hugging Face hub");

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        api.repo(Repo::new(repo_id.to_string(), RepoType::Model))
            .get(file)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", file, e)))
    }
}
