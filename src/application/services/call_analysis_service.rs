use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    EvaluationError, LlmClient, TranscriptionError, TranscriptionProvider,
};
use crate::domain::{AudioUpload, CallAnalysis};
use crate::infrastructure::observability::preview_text;

use super::evaluation_service::EvaluationService;
use super::response_normalizer::{ScorePolicy, normalize};
use super::transcription_service::TranscriptionService;

/// Runs transcription, evaluation and normalization for one uploaded call.
pub struct CallAnalysisService<P, L>
where
    P: TranscriptionProvider + ?Sized,
    L: LlmClient + ?Sized,
{
    transcription_service: TranscriptionService<P>,
    evaluation_service: EvaluationService<L>,
    score_policy: ScorePolicy,
}

impl<P, L> CallAnalysisService<P, L>
where
    P: TranscriptionProvider + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(
        transcription_service: TranscriptionService<P>,
        evaluation_service: EvaluationService<L>,
        score_policy: ScorePolicy,
    ) -> Self {
        Self {
            transcription_service,
            evaluation_service,
            score_policy,
        }
    }

    /// Consumes the upload; its file is gone by the time this returns, whatever the outcome.
    pub async fn analyze(
        &self,
        upload: AudioUpload,
        cancel: &CancellationToken,
    ) -> Result<CallAnalysis, AnalysisError> {
        tracing::info!(
            filename = %upload.filename(),
            bytes = upload.size_bytes(),
            "Starting call analysis"
        );

        let audio = upload
            .open_stream()
            .await
            .map_err(AnalysisError::AudioRead)?;

        let transcript = self
            .transcription_service
            .transcribe(audio, cancel)
            .await
            .map_err(|e| match e {
                TranscriptionError::Cancelled => AnalysisError::Cancelled,
                other => AnalysisError::Transcription(other),
            })?;

        tracing::info!(
            chars = transcript.len(),
            transcript = %preview_text(&transcript),
            "Transcript received"
        );

        let raw_output = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AnalysisError::Cancelled),
            output = self.evaluation_service.evaluate(&transcript) => output?,
        };

        let ai_result = normalize(&raw_output, self.score_policy);

        if let Err(e) = upload.release() {
            tracing::warn!(error = %e, "Failed to delete temporary audio file");
        }

        Ok(CallAnalysis {
            transcript,
            ai_result,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("reading uploaded audio: {0}")]
    AudioRead(std::io::Error),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("evaluation: {0}")]
    Evaluation(#[from] EvaluationError),
    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Diagnostic detail for the caller: the provider's payload when one was captured.
    pub fn details(&self) -> Value {
        match self {
            AnalysisError::Transcription(e) => e.details(),
            AnalysisError::Evaluation(e) => e.details(),
            other => Value::String(other.to_string()),
        }
    }
}
