use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{LlmClient, TranscriptionProvider};
use crate::application::services::CallAnalysisService;
use crate::infrastructure::storage::TempAudioStore;

pub struct AppState<P, L>
where
    P: TranscriptionProvider + ?Sized,
    L: LlmClient + ?Sized,
{
    pub analysis_service: Arc<CallAnalysisService<P, L>>,
    pub upload_store: Arc<TempAudioStore>,
    /// Cancelled on shutdown; each request derives a child token from it.
    pub shutdown: CancellationToken,
    pub max_body_bytes: Option<usize>,
}

impl<P, L> Clone for AppState<P, L>
where
    P: TranscriptionProvider + ?Sized,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            upload_store: Arc::clone(&self.upload_store),
            shutdown: self.shutdown.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }
}
