//! WebSocket infrastructure for real-time dashboard refresh.
//!
//! Provides connection management, heartbeat monitoring, the HTTP upgrade
//! handler used by Axum routes, and the forwarder task that turns refresh
//! ticks into client-facing messages.

mod forwarder;
mod handler;
mod heartbeat;
pub mod manager;

pub use forwarder::start_refresh_forwarder;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
