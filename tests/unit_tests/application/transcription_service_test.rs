use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use call_analyzer::application::ports::TranscriptionError;
use call_analyzer::application::services::{PollPolicy, TranscriptionService};
use call_analyzer::domain::{AudioStream, JobId};

use crate::helpers::{MockTranscriptionProvider, TranscriptOutcome};

fn policy(interval_secs: u64, timeout_secs: u64) -> PollPolicy {
    PollPolicy {
        interval: Duration::from_secs(interval_secs),
        timeout: Duration::from_secs(timeout_secs),
    }
}

fn audio(bytes: &'static [u8]) -> AudioStream {
    futures::stream::once(async move { Ok(bytes::Bytes::from_static(bytes)) }).boxed()
}

#[tokio::test(start_paused = true)]
async fn given_job_completes_after_pending_polls_when_transcribing_then_returns_text() {
    let provider = Arc::new(MockTranscriptionProvider::new(
        TranscriptOutcome::Completed("hello there".to_string()),
        2,
    ));
    let service = TranscriptionService::new(Arc::clone(&provider), policy(1, 60));

    let result = service
        .transcribe(audio(b"fake audio"), &CancellationToken::new())
        .await;

    assert_eq!(result.unwrap(), "hello there");
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(provider.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(provider.fetch_calls.load(Ordering::SeqCst), 3);
    assert_eq!(provider.uploaded_bytes.load(Ordering::SeqCst), 10);
}

#[tokio::test(start_paused = true)]
async fn given_polls_when_waiting_then_spaces_them_by_interval() {
    let provider = Arc::new(MockTranscriptionProvider::new(
        TranscriptOutcome::Completed("done".to_string()),
        3,
    ));
    let service = TranscriptionService::new(Arc::clone(&provider), policy(1, 60));
    let started = tokio::time::Instant::now();

    service
        .poll_until_done(&JobId::new("job-1"), &CancellationToken::new())
        .await
        .unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(3), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(4), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn given_provider_reports_failure_when_polling_then_returns_transcription_failed() {
    let provider = Arc::new(MockTranscriptionProvider::failing("audio has no speech"));
    let service = TranscriptionService::new(Arc::clone(&provider), policy(1, 60));

    let result = service
        .poll_until_done(&JobId::new("job-1"), &CancellationToken::new())
        .await;

    match result {
        Err(TranscriptionError::TranscriptionFailed(reason)) => {
            assert_eq!(reason, "audio has no speech")
        }
        other => panic!("expected TranscriptionFailed, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn given_job_never_completes_when_deadline_passes_then_returns_timeout() {
    let provider = Arc::new(MockTranscriptionProvider::new(
        TranscriptOutcome::NeverCompletes,
        0,
    ));
    let service = TranscriptionService::new(Arc::clone(&provider), policy(1, 3));

    let result = service
        .poll_until_done(&JobId::new("job-1"), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Timeout(timeout)) if timeout == Duration::from_secs(3)
    ));
    assert_eq!(provider.fetch_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn given_cancellation_during_wait_when_polling_then_returns_cancelled() {
    let provider = Arc::new(MockTranscriptionProvider::new(
        TranscriptOutcome::NeverCompletes,
        0,
    ));
    let service = TranscriptionService::new(Arc::clone(&provider), policy(1, 60));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        trigger.cancel();
    });

    let result = service.poll_until_done(&JobId::new("job-1"), &cancel).await;

    assert!(matches!(result, Err(TranscriptionError::Cancelled)));
    assert_eq!(provider.fetch_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn given_already_cancelled_token_when_transcribing_then_makes_no_provider_calls() {
    let provider = Arc::new(MockTranscriptionProvider::completing("unused"));
    let service = TranscriptionService::new(Arc::clone(&provider), PollPolicy::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = service.transcribe(audio(b"audio"), &cancel).await;

    assert!(matches!(result, Err(TranscriptionError::Cancelled)));
    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn given_upload_rejected_when_transcribing_then_returns_upload_error_without_job() {
    let provider = Arc::new(MockTranscriptionProvider::new(
        TranscriptOutcome::UploadRejected,
        0,
    ));
    let service = TranscriptionService::new(Arc::clone(&provider), PollPolicy::default());

    let result = service
        .transcribe(audio(b"audio"), &CancellationToken::new())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, TranscriptionError::Upload(_)));
    assert_eq!(err.details(), serde_json::json!({"error": "file too large"}));
    assert_eq!(provider.create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(provider.fetch_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn given_default_poll_policy_when_created_then_polls_every_second_for_ten_minutes() {
    let policy = PollPolicy::default();
    assert_eq!(policy.interval, Duration::from_secs(1));
    assert_eq!(policy.timeout, Duration::from_secs(600));
}

#[tokio::test(start_paused = true)]
async fn given_status_query_that_never_returns_when_polling_then_times_out_at_deadline() {
    let provider = Arc::new(MockTranscriptionProvider::new(
        TranscriptOutcome::StallsOnPoll,
        0,
    ));
    let service = TranscriptionService::new(Arc::clone(&provider), policy(1, 3));
    let started = tokio::time::Instant::now();

    let result = tokio::time::timeout(
        Duration::from_secs(3600),
        service.poll_until_done(&JobId::new("job-1"), &CancellationToken::new()),
    )
    .await
    .expect("poll must end by its own deadline");

    assert!(matches!(
        result,
        Err(TranscriptionError::Timeout(timeout)) if timeout == Duration::from_secs(3)
    ));
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert_eq!(provider.fetch_calls.load(Ordering::SeqCst), 1);
}
