use std::sync::Arc;

use crate::application::ports::{EvaluationError, LlmClient};
use crate::infrastructure::observability::preview_text;

use super::evaluator_prompt::{EvaluatorPrompt, TranscriptEmbedding};

pub struct EvaluationService<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
    embedding: TranscriptEmbedding,
}

impl<L> EvaluationService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, embedding: TranscriptEmbedding) -> Self {
        Self {
            llm_client,
            embedding,
        }
    }

    /// Returns the model's raw output for the transcript.
    pub async fn evaluate(&self, transcript: &str) -> Result<String, EvaluationError> {
        let prompt = EvaluatorPrompt::build(transcript, self.embedding);

        tracing::debug!(
            embedding = ?self.embedding,
            prompt_chars = prompt.user.len(),
            "Requesting transcript evaluation"
        );

        let output = self
            .llm_client
            .complete(&prompt.system, &prompt.user)
            .await?;

        tracing::debug!(output = %preview_text(&output), "Evaluation output received");

        Ok(output)
    }
}
