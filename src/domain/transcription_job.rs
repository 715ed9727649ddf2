use std::fmt;

use super::JobStatus;

/// Provider-assigned identifier of a transcription job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of uploaded audio on the transcription provider's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadUrl(String);

impl UploadUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a provider-side job as last observed by polling.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionJob {
    pub id: JobId,
    pub status: JobStatus,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl TranscriptionJob {
    pub fn new(id: JobId, status: JobStatus) -> Self {
        Self {
            id,
            status,
            text: None,
            error: None,
        }
    }

    pub fn completed(id: JobId, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, JobStatus::Completed)
        }
    }

    pub fn failed(id: JobId, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(id, JobStatus::Failed)
        }
    }
}
