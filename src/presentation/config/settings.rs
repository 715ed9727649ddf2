use std::path::Path;
use std::time::Duration;

use config::{Config, File, Map};
use serde::Deserialize;

use super::Environment;
use crate::application::services::{PollPolicy, ScorePolicy, TranscriptEmbedding};
use crate::infrastructure::llm::{DEFAULT_CHAT_BASE_URL, DEFAULT_CHAT_MODEL};
use crate::infrastructure::transcription::DEFAULT_ASSEMBLYAI_BASE_URL;

/// Unprefixed variables honoured for compatibility with existing deployments.
const LEGACY_OVERRIDES: [(&str, &str); 3] = [
    ("ASSEMBLYAI_API_KEY", "transcription.api_key"),
    ("PERPLEXITY_API_KEY", "evaluation.api_key"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub evaluation: EvaluationSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub api_key: String,
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub poll_timeout_secs: u64,
}

impl TranscriptionSettings {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.poll_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub score_policy: ScorePolicy,
    pub transcript_embedding: TranscriptEmbedding,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: String,
    /// Request body cap for the analyze route. Unlimited when absent.
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl Settings {
    /// Loads settings from `./appsettings.{env}.*` and the process environment.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Self::load_from(environment, Path::new("."), std::env::vars().collect())
    }

    /// Layers, lowest precedence first: built-in defaults, the optional settings
    /// file in `config_dir`, `APP__SECTION__KEY` variables, then the legacy
    /// unprefixed variables.
    pub fn load_from(
        environment: Environment,
        config_dir: &Path,
        vars: Map<String, String>,
    ) -> Result<Self, SettingsError> {
        let settings_file = config_dir.join(environment.settings_file_stem());

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("transcription.api_key", "")?
            .set_default("transcription.base_url", DEFAULT_ASSEMBLYAI_BASE_URL)?
            .set_default("transcription.poll_interval_ms", 1000)?
            .set_default("transcription.poll_timeout_secs", 600)?
            .set_default("evaluation.api_key", "")?
            .set_default("evaluation.base_url", DEFAULT_CHAT_BASE_URL)?
            .set_default("evaluation.model", DEFAULT_CHAT_MODEL)?
            .set_default("evaluation.score_policy", "clamp")?
            .set_default("evaluation.transcript_embedding", "triple_quote")?
            .set_default("upload.dir", "uploads")?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&settings_file.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in LEGACY_OVERRIDES {
            let value = vars.get(var).map(|v| v.trim()).filter(|v| !v.is_empty());
            builder = builder.set_override_option(key, value.map(str::to_string))?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.transcription.api_key.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "transcription.api_key (or ASSEMBLYAI_API_KEY) is required".to_string(),
            ));
        }
        if self.evaluation.api_key.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "evaluation.api_key (or PERPLEXITY_API_KEY) is required".to_string(),
            ));
        }
        if self.transcription.poll_interval_ms == 0 {
            return Err(SettingsError::Invalid(
                "transcription.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.transcription.poll_timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "transcription.poll_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
