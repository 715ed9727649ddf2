use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::StreamExt;

use call_analyzer::application::ports::{
    EvaluationError, LlmClient, ProviderError, TranscriptionError, TranscriptionProvider,
};
use call_analyzer::domain::{AudioStream, JobId, JobStatus, TranscriptionJob, UploadUrl};

pub const MOCK_UPLOAD_URL: &str = "https://cdn.example.test/upload/abc";
pub const MOCK_JOB_ID: &str = "job-123";

#[derive(Debug, Clone)]
pub enum TranscriptOutcome {
    Completed(String),
    Failed(String),
    NeverCompletes,
    /// Status queries never resolve.
    StallsOnPoll,
    UploadRejected,
}

/// Transcription provider that reports `pending_polls` in-progress statuses
/// before settling on its outcome.
pub struct MockTranscriptionProvider {
    outcome: TranscriptOutcome,
    pending_polls: usize,
    pub upload_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub uploaded_bytes: AtomicUsize,
}

impl MockTranscriptionProvider {
    pub fn new(outcome: TranscriptOutcome, pending_polls: usize) -> Self {
        Self {
            outcome,
            pending_polls,
            upload_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            uploaded_bytes: AtomicUsize::new(0),
        }
    }

    pub fn completing(text: &str) -> Self {
        Self::new(TranscriptOutcome::Completed(text.to_string()), 0)
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(TranscriptOutcome::Failed(reason.to_string()), 0)
    }

    pub fn total_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
            + self.create_calls.load(Ordering::SeqCst)
            + self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionProvider for MockTranscriptionProvider {
    async fn upload(&self, mut audio: AudioStream) -> Result<UploadUrl, TranscriptionError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);

        if matches!(self.outcome, TranscriptOutcome::UploadRejected) {
            return Err(TranscriptionError::Upload(ProviderError::http(
                413,
                r#"{"error":"file too large"}"#,
            )));
        }

        while let Some(chunk) = audio.next().await {
            let bytes = chunk.map_err(|e| TranscriptionError::Upload(ProviderError::transport(e.to_string())))?;
            self.uploaded_bytes.fetch_add(bytes.len(), Ordering::SeqCst);
        }

        Ok(UploadUrl::new(MOCK_UPLOAD_URL))
    }

    async fn create_job(
        &self,
        upload_url: &UploadUrl,
    ) -> Result<TranscriptionJob, TranscriptionError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(upload_url.as_str(), MOCK_UPLOAD_URL);
        Ok(TranscriptionJob::new(JobId::new(MOCK_JOB_ID), JobStatus::Queued))
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<TranscriptionJob, TranscriptionError> {
        let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let id = job_id.clone();

        if matches!(self.outcome, TranscriptOutcome::StallsOnPoll) {
            return std::future::pending().await;
        }

        if call <= self.pending_polls {
            return Ok(TranscriptionJob::new(id, JobStatus::Processing));
        }

        Ok(match &self.outcome {
            TranscriptOutcome::Completed(text) => TranscriptionJob::completed(id, text.clone()),
            TranscriptOutcome::Failed(reason) => TranscriptionJob::failed(id, reason.clone()),
            TranscriptOutcome::NeverCompletes
            | TranscriptOutcome::StallsOnPoll
            | TranscriptOutcome::UploadRejected => {
                TranscriptionJob::new(id, JobStatus::Processing)
            }
        })
    }
}

pub struct MockLlmClient {
    /// `None` never answers.
    response: Option<Result<String, (u16, String)>>,
    pub calls: AtomicUsize,
    pub last_user_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn returning(output: &str) -> Self {
        Self {
            response: Some(Ok(output.to_string())),
            calls: AtomicUsize::new(0),
            last_user_prompt: Mutex::new(None),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Some(Err((status, body.to_string()))),
            calls: AtomicUsize::new(0),
            last_user_prompt: Mutex::new(None),
        }
    }

    pub fn stalling() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
            last_user_prompt: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EvaluationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_prompt.lock().unwrap() = Some(user_prompt.to_string());

        match &self.response {
            None => std::future::pending().await,
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err((status, body))) => Err(EvaluationError::RequestFailed(ProviderError::http(
                *status, body,
            ))),
        }
    }
}
