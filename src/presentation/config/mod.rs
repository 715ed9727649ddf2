mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    EvaluationSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    TranscriptionSettings, UploadSettings,
};
