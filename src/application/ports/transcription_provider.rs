use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::ProviderError;
use crate::domain::{AudioStream, JobId, TranscriptionJob, UploadUrl};

/// Asynchronous, job-based speech-to-text provider.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn upload(&self, audio: AudioStream) -> Result<UploadUrl, TranscriptionError>;

    async fn create_job(&self, upload_url: &UploadUrl)
    -> Result<TranscriptionJob, TranscriptionError>;

    async fn fetch_job(&self, job_id: &JobId) -> Result<TranscriptionJob, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio upload failed: {0}")]
    Upload(ProviderError),
    #[error("transcription job creation failed: {0}")]
    JobCreation(ProviderError),
    #[error("transcription status poll failed: {0}")]
    Poll(ProviderError),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("transcription did not complete within {0:?}")]
    Timeout(Duration),
    #[error("transcription cancelled")]
    Cancelled,
}

impl TranscriptionError {
    pub fn details(&self) -> Value {
        match self {
            TranscriptionError::Upload(e)
            | TranscriptionError::JobCreation(e)
            | TranscriptionError::Poll(e) => e.payload.clone(),
            other => Value::String(other.to_string()),
        }
    }
}
