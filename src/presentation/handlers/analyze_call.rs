use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{LlmClient, TranscriptionProvider};
use crate::domain::AudioUpload;
use crate::infrastructure::storage::UploadStoreError;
use crate::presentation::state::AppState;

pub const AUDIO_FIELD: &str = "audio";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn error_response(status: StatusCode, error: &str, details: Option<Value>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

fn no_audio_uploaded() -> Response {
    error_response(StatusCode::BAD_REQUEST, "No audio file uploaded", None)
}

fn processing_failed(details: Value) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Processing failed",
        Some(details),
    )
}

#[tracing::instrument(skip_all)]
pub async fn analyze_call_handler<P, L>(
    State(state): State<AppState<P, L>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    P: TranscriptionProvider + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Analyze request is not multipart");
            return no_audio_uploaded();
        }
    };

    let upload = match spool_audio_field(&state, &mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            tracing::warn!("Analyze request with no audio file");
            return no_audio_uploaded();
        }
        Err(response) => return response,
    };

    let cancel = state.shutdown.child_token();

    match state.analysis_service.analyze(upload, &cancel).await {
        Ok(analysis) => {
            tracing::info!(
                transcript_chars = analysis.transcript.len(),
                "Call analysis completed"
            );
            (StatusCode::OK, Json(analysis)).into_response()
        }
        Err(e) => {
            let details = e.details();
            tracing::error!(error = %e, details = %details, "Call analysis failed");
            processing_failed(details)
        }
    }
}

/// Spools the first `audio` field, skipping any other fields before it.
async fn spool_audio_field<P, L>(
    state: &AppState<P, L>,
    multipart: &mut Multipart,
) -> Result<Option<AudioUpload>, Response>
where
    P: TranscriptionProvider + ?Sized,
    L: LlmClient + ?Sized,
{
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(invalid_multipart(e.to_string()));
            }
        };

        if field.name() != Some(AUDIO_FIELD) {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or("audio").to_string();
        tracing::debug!(filename = %filename, content_type = ?field.content_type(), "Receiving audio upload");

        return match state.upload_store.spool(&filename, field).await {
            Ok(upload) => Ok(Some(upload)),
            Err(UploadStoreError::Stream(message)) => {
                tracing::warn!(error = %message, "Audio upload interrupted");
                Err(invalid_multipart(message))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to spool audio upload");
                Err(processing_failed(Value::String(e.to_string())))
            }
        };
    }
}

fn invalid_multipart(message: String) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        "Invalid multipart body",
        Some(Value::String(message)),
    )
}
