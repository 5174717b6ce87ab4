use std::fmt;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub audio: AudioSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub upload_dir: String,
    pub min_upload_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub normalizer: NormalizerSetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerSetting {
    Ffmpeg,
    Native,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub model_size: ModelSize,
    pub device: ComputeDevice,
    pub precision: ComputePrecision,
    pub model_dir: String,
    pub download_models: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub threads: Option<usize>,
    pub beam_size: u32,
    pub vad_filter: bool,
    pub min_silence_ms: u32,
}

impl TranscriptionSettings {
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(8)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    /// Name used in whisper.cpp GGML file names.
    pub fn ggml_name(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large-v3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeDevice {
    Cpu,
    #[serde(alias = "gpu", alias = "accelerator")]
    Cuda,
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeDevice::Cpu => f.write_str("cpu"),
            ComputeDevice::Cuda => f.write_str("cuda"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputePrecision {
    Int8,
    Float16,
    Float32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.<env>.toml`, then `APP__SECTION__KEY` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_mb", 512)?
            .set_default("storage.upload_dir", "uploads")?
            .set_default("storage.min_upload_bytes", 1024)?
            .set_default("audio.normalizer", "ffmpeg")?
            .set_default("transcription.model_size", "base")?
            .set_default("transcription.device", "cpu")?
            .set_default("transcription.precision", "int8")?
            .set_default("transcription.model_dir", "models")?
            .set_default("transcription.download_models", true)?
            .set_default("transcription.beam_size", 5)?
            .set_default("transcription.vad_filter", true)?
            .set_default("transcription.min_silence_ms", 500)?
            .set_default("logging.json", environment == Environment::Prod)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
