use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ProviderError, TranscriptionError, TranscriptionProvider};
use crate::domain::{AudioStream, JobId, JobStatus, TranscriptionJob, UploadUrl};
use crate::presentation::config::TranscriptionSettings;

pub const DEFAULT_ASSEMBLYAI_BASE_URL: &str = "https://api.assemblyai.com";

pub struct AssemblyAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Serialize)]
struct CreateTranscriptRequest<'a> {
    audio_url: &'a str,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    id: String,
    status: JobStatus,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<TranscriptResponse> for TranscriptionJob {
    fn from(response: TranscriptResponse) -> Self {
        Self {
            id: JobId::new(response.id),
            status: response.status,
            text: response.text,
            error: response.error,
        }
    }
}

impl AssemblyAiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_ASSEMBLYAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    pub fn from_settings(settings: &TranscriptionSettings) -> Self {
        Self::new(settings.api_key.clone(), Some(settings.base_url.clone()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v2/{}", self.base_url, path)
    }
}

async fn read_failure(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    ProviderError::http(status, &body)
}

#[async_trait]
impl TranscriptionProvider for AssemblyAiClient {
    async fn upload(&self, audio: AudioStream) -> Result<UploadUrl, TranscriptionError> {
        tracing::debug!("Streaming audio to AssemblyAI upload endpoint");

        let response = self
            .client
            .post(self.endpoint("upload"))
            .header(AUTHORIZATION, &self.api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(reqwest::Body::wrap_stream(audio))
            .send()
            .await
            .map_err(|e| TranscriptionError::Upload(ProviderError::transport(e.to_string())))?;

        if !response.status().is_success() {
            return Err(TranscriptionError::Upload(read_failure(response).await));
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            TranscriptionError::Upload(ProviderError::transport(format!("parse response: {}", e)))
        })?;

        Ok(UploadUrl::new(uploaded.upload_url))
    }

    async fn create_job(
        &self,
        upload_url: &UploadUrl,
    ) -> Result<TranscriptionJob, TranscriptionError> {
        let response = self
            .client
            .post(self.endpoint("transcript"))
            .header(AUTHORIZATION, &self.api_key)
            .json(&CreateTranscriptRequest {
                audio_url: upload_url.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                TranscriptionError::JobCreation(ProviderError::transport(e.to_string()))
            })?;

        if !response.status().is_success() {
            return Err(TranscriptionError::JobCreation(
                read_failure(response).await,
            ));
        }

        let created: TranscriptResponse = response.json().await.map_err(|e| {
            TranscriptionError::JobCreation(ProviderError::transport(format!(
                "parse response: {}",
                e
            )))
        })?;

        Ok(created.into())
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<TranscriptionJob, TranscriptionError> {
        let response = self
            .client
            .get(self.endpoint(&format!("transcript/{}", job_id)))
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::Poll(ProviderError::transport(e.to_string())))?;

        if !response.status().is_success() {
            return Err(TranscriptionError::Poll(read_failure(response).await));
        }

        let job: TranscriptResponse = response.json().await.map_err(|e| {
            TranscriptionError::Poll(ProviderError::transport(format!("parse response: {}", e)))
        })?;

        Ok(job.into())
    }
}
