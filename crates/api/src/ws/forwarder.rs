use std::sync::Arc;

use axum::extract::ws::{Message, Utf8Bytes};
use tokio::sync::broadcast;

use crate::ws::manager::WsManager;

/// The message clients receive when the store has changed. Clients respond
/// by refetching the project list; no per-entity payload is sent.
const REFRESH_MESSAGE: &str = r#"{"type":"refresh"}"#;

/// Spawn a background task that forwards refresh ticks to all WebSocket
/// clients as a `{"type":"refresh"}` text message.
///
/// The task exits when the tick channel closes (during shutdown).
pub fn start_refresh_forwarder(
    ws_manager: Arc<WsManager>,
    mut ticks: broadcast::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match ticks.recv().await {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    let count = ws_manager.connection_count().await;
                    tracing::debug!(count, "Broadcasting refresh to WebSocket clients");
                    ws_manager
                        .broadcast(Message::Text(Utf8Bytes::from_static(REFRESH_MESSAGE)))
                        .await;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Refresh tick channel closed, stopping forwarder");
                    break;
                }
            }
        }
    })
}
