mod llm_client;
mod provider_error;
mod transcription_provider;

pub use llm_client::{EvaluationError, LlmClient};
pub use provider_error::ProviderError;
pub use transcription_provider::{TranscriptionError, TranscriptionProvider};
