use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{TranscriptionError, TranscriptionProvider};
use crate::domain::{AudioStream, JobId, JobStatus};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

pub struct TranscriptionService<P>
where
    P: TranscriptionProvider + ?Sized,
{
    provider: Arc<P>,
    poll_policy: PollPolicy,
}

impl<P> TranscriptionService<P>
where
    P: TranscriptionProvider + ?Sized,
{
    pub fn new(provider: Arc<P>, poll_policy: PollPolicy) -> Self {
        Self {
            provider,
            poll_policy,
        }
    }

    pub async fn transcribe(
        &self,
        audio: AudioStream,
        cancel: &CancellationToken,
    ) -> Result<String, TranscriptionError> {
        let upload_url = until_cancelled(cancel, self.provider.upload(audio)).await?;
        tracing::debug!(upload_url = %upload_url, "Audio uploaded to transcription provider");

        let job = until_cancelled(cancel, self.provider.create_job(&upload_url)).await?;
        tracing::info!(job_id = %job.id, status = %job.status, "Transcription job created");

        self.poll_until_done(&job.id, cancel).await
    }

    /// Polls the job until it reaches a terminal status or the deadline passes.
    ///
    /// The first status query is issued immediately. A wait that would end past
    /// the deadline is not started, and a status query still in flight at the
    /// deadline is abandoned. Both fail with [`TranscriptionError::Timeout`].
    pub async fn poll_until_done(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
    ) -> Result<String, TranscriptionError> {
        let started = Instant::now();
        let deadline = started + self.poll_policy.timeout;

        match tokio::time::timeout_at(deadline, self.poll_loop(job_id, cancel, started, deadline))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    job_id = %job_id,
                    timeout_secs = self.poll_policy.timeout.as_secs(),
                    "Transcription status query still pending at deadline"
                );
                Err(TranscriptionError::Timeout(self.poll_policy.timeout))
            }
        }
    }

    async fn poll_loop(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
        started: Instant,
        deadline: Instant,
    ) -> Result<String, TranscriptionError> {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let job = until_cancelled(cancel, self.provider.fetch_job(job_id)).await?;

            match job.status {
                JobStatus::Completed => {
                    let text = job.text.unwrap_or_default();
                    tracing::info!(
                        job_id = %job_id,
                        attempts,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        chars = text.len(),
                        "Transcription completed"
                    );
                    return Ok(text);
                }
                JobStatus::Failed => {
                    let reason = job
                        .error
                        .unwrap_or_else(|| "provider reported failure".to_string());
                    tracing::warn!(job_id = %job_id, reason = %reason, "Transcription failed");
                    return Err(TranscriptionError::TranscriptionFailed(reason));
                }
                JobStatus::Queued | JobStatus::Processing => {}
            }

            if Instant::now() + self.poll_policy.interval > deadline {
                tracing::warn!(
                    job_id = %job_id,
                    attempts,
                    timeout_secs = self.poll_policy.timeout.as_secs(),
                    "Transcription poll deadline reached"
                );
                return Err(TranscriptionError::Timeout(self.poll_policy.timeout));
            }

            tracing::debug!(job_id = %job_id, status = %job.status, attempts, "Transcription pending");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TranscriptionError::Cancelled),
                _ = tokio::time::sleep(self.poll_policy.interval) => {}
            }
        }
    }
}

async fn until_cancelled<T, F>(
    cancel: &CancellationToken,
    call: F,
) -> Result<T, TranscriptionError>
where
    F: Future<Output = Result<T, TranscriptionError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TranscriptionError::Cancelled),
        result = call => result,
    }
}
