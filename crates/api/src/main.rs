use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wildtale_api::config::ServerConfig;
use wildtale_api::router::build_app_router;
use wildtale_api::{state, ws};
use wildtale_openai::OpenAiClient;
use wildtale_pipeline::{JobRegistry, Pipeline, PipelineConfig};
use wildtale_store::{OutputLayout, StoryStore};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildtale=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let layout = OutputLayout::new(config.output_dir.clone());
    layout
        .ensure()
        .await
        .expect("Failed to create output directories");
    let store = StoryStore::new(layout);
    tracing::info!(root = %config.output_dir.display(), "Output directories ready");

    if !wildtale_core::ffmpeg::ffmpeg_available().await {
        tracing::warn!("ffmpeg not found on PATH; video production will fail");
    }

    // --- OpenAI client ---
    let openai = Arc::new(OpenAiClient::from_env().expect("OPENAI_API_KEY must be set"));

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus ---
    let event_bus = Arc::new(wildtale_events::EventBus::default());

    // Spawn the forwarder that pushes pipeline events to browsers.
    let forwarder_handle = ws::start_event_forwarder(&event_bus, Arc::clone(&ws_manager));
    tracing::info!("Event bus and forwarder started");

    // --- Pipeline ---
    let jobs = Arc::new(JobRegistry::new());
    let pipeline = Arc::new(Pipeline::new(
        openai,
        store.clone(),
        Arc::clone(&event_bus),
        Arc::clone(&jobs),
        PipelineConfig::from_env(),
    ));

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        pipeline: Arc::clone(&pipeline),
        event_bus: Arc::clone(&event_bus),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Signal running jobs first (they may have in-flight API calls).
    jobs.cancel_all().await;
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::time::sleep(grace.min(Duration::from_secs(5))).await;
    tracing::info!("Background jobs cancelled");

    // Drop the event bus sender to close the broadcast channel.
    // This signals the forwarder to shut down.
    drop(pipeline);
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), forwarder_handle).await;
    tracing::info!("Event forwarder shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
