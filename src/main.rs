use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use call_analyzer::application::services::{
    CallAnalysisService, EvaluationService, TranscriptionService,
};
use call_analyzer::infrastructure::llm::ChatCompletionClient;
use call_analyzer::infrastructure::observability::{TracingConfig, init_tracing};
use call_analyzer::infrastructure::storage::TempAudioStore;
use call_analyzer::infrastructure::transcription::AssemblyAiClient;
use call_analyzer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        &TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let transcription_provider = Arc::new(AssemblyAiClient::from_settings(&settings.transcription));
    let llm_client = Arc::new(ChatCompletionClient::from_settings(&settings.evaluation));

    tracing::info!(
        model = llm_client.model(),
        score_policy = ?settings.evaluation.score_policy,
        transcript_embedding = ?settings.evaluation.transcript_embedding,
        poll_timeout_secs = settings.transcription.poll_timeout_secs,
        "Pipeline configured"
    );

    let analysis_service = Arc::new(CallAnalysisService::new(
        TranscriptionService::new(
            transcription_provider,
            settings.transcription.poll_policy(),
        ),
        EvaluationService::new(llm_client, settings.evaluation.transcript_embedding),
        settings.evaluation.score_policy,
    ));

    let upload_store = Arc::new(TempAudioStore::new(settings.upload.dir.clone())?);
    tracing::info!(dir = %upload_store.dir().display(), "Upload directory ready");

    let shutdown = CancellationToken::new();

    let state = AppState {
        analysis_service,
        upload_store,
        shutdown: shutdown.clone(),
        max_body_bytes: settings.upload.max_body_bytes,
    };

    let router = create_router(state);

    let listener =
        TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received, cancelling in-flight analyses");
    shutdown.cancel();
}
