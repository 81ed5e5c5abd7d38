//! Event-bus to WebSocket bridge.
//!
//! Subscribes to the pipeline event bus and pushes every event to all
//! connected browser clients as a JSON text frame.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use wildtale_events::{EventBus, PipelineEvent};

use crate::ws::manager::WsManager;

/// Spawn the forwarder task.
///
/// The task runs until the event bus is dropped (i.e. the channel
/// closes during shutdown).
pub fn start_event_forwarder(
    bus: &EventBus,
    ws_manager: Arc<WsManager>,
) -> tokio::task::JoinHandle<()> {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => forward(&ws_manager, &event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event forwarder lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, forwarder shutting down");
                    break;
                }
            }
        }
    })
}

async fn forward(ws_manager: &WsManager, event: &PipelineEvent) {
    match serde_json::to_string(event) {
        Ok(text) => {
            ws_manager.broadcast(Message::Text(text.into())).await;
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                event_type = %event.event_type,
                "Failed to serialize event"
            );
        }
    }
}
