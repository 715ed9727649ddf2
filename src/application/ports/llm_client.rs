use async_trait::async_trait;
use serde_json::Value;

use super::ProviderError;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one system and one user message, returning the first completion verbatim.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, EvaluationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("completion request failed: {0}")]
    RequestFailed(ProviderError),
    #[error("completion rate limited: {0}")]
    RateLimited(ProviderError),
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
    #[error("completion response has no content")]
    MissingContent,
}

impl EvaluationError {
    pub fn details(&self) -> Value {
        match self {
            EvaluationError::RequestFailed(e) | EvaluationError::RateLimited(e) => {
                e.payload.clone()
            }
            other => Value::String(other.to_string()),
        }
    }
}
