//! In-process eventing for the shop tracker.
//!
//! The [`bus`] module carries domain events between handlers and the
//! WebSocket layer; [`coalesce`] turns bursts of store changes into
//! single refresh ticks for connected clients.

pub mod bus;
pub mod coalesce;

pub use bus::{EventBus, StoreEvent};
pub use coalesce::RefreshCoordinator;
