//! WebSocket infrastructure for real-time pipeline progress.
//!
//! Provides connection management, heartbeat monitoring, the HTTP
//! upgrade handler, and the forwarder task that pushes pipeline events
//! to connected browsers.

mod forwarder;
mod handler;
mod heartbeat;
pub mod manager;

pub use forwarder::start_event_forwarder;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Mount the WebSocket upgrade route (under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}
