mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, ComputeDevice, ComputePrecision, LoggingSettings, ModelSize,
    NormalizerSetting, ServerSettings, Settings, StorageSettings, TranscriptionSettings,
};
