use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Story persistence (JSON files under the output root).
    pub store: wildtale_store::StoryStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Generation pipeline (story and video jobs).
    pub pipeline: Arc<wildtale_pipeline::Pipeline>,
    /// Centralized event bus for publishing pipeline events.
    pub event_bus: Arc<wildtale_events::EventBus>,
}
