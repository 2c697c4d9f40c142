//! Burst coalescing for store change events.
//!
//! [`RefreshCoordinator`] runs as a background task. It subscribes to the
//! [`EventBus`](crate::bus::EventBus) and collapses bursts of changes into
//! single refresh ticks, so a client reacting to ticks refetches the store
//! once per burst instead of once per event.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::{EventBus, StoreEvent};

/// Quiet window after the first event of a burst before a tick is emitted.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(250);

/// Buffer capacity for the outbound tick channel.
const TICK_CAPACITY: usize = 16;

// ---------------------------------------------------------------------------
// RefreshCoordinator
// ---------------------------------------------------------------------------

/// Background service that debounces store events into refresh ticks.
pub struct RefreshCoordinator {
    events: broadcast::Receiver<StoreEvent>,
    ticks: broadcast::Sender<()>,
    window: Duration,
}

impl RefreshCoordinator {
    /// Create a coordinator subscribed to the given bus.
    pub fn new(bus: &EventBus) -> Self {
        let (ticks, _) = broadcast::channel(TICK_CAPACITY);
        Self {
            events: bus.subscribe(),
            ticks,
            window: DEBOUNCE_WINDOW,
        }
    }

    #[cfg(test)]
    fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Subscribe to refresh ticks.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.ticks.subscribe()
    }

    /// Run the coalescing loop.
    ///
    /// The first event of a burst arms the debounce timer; further events
    /// inside the window are absorbed. When the window elapses a single tick
    /// is emitted. A lagged receiver degrades to one tick, never a miss.
    /// The loop exits when the provided [`CancellationToken`] is cancelled.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut pending = false;
        let deadline = tokio::time::sleep(self.window);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Refresh coordinator cancelled");
                    break;
                }
                result = self.events.recv() => {
                    match result {
                        Ok(event) => {
                            tracing::debug!(event_type = %event.event_type, "Store changed");
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Missed events still mean the store changed.
                            tracing::warn!(skipped, "Refresh coordinator lagged behind the bus");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Event bus closed, stopping refresh coordinator");
                            break;
                        }
                    }
                    if !pending {
                        pending = true;
                        deadline.as_mut().reset(tokio::time::Instant::now() + self.window);
                    }
                }
                _ = &mut deadline, if pending => {
                    pending = false;
                    // Ignore the SendError -- it only means there are zero receivers.
                    let _ = self.ticks.send(());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator(bus: &EventBus) -> RefreshCoordinator {
        RefreshCoordinator::new(bus).with_window(Duration::from_millis(20))
    }

    #[tokio::test]
    async fn burst_of_events_yields_single_tick() {
        let bus = EventBus::default();
        let coordinator = coordinator(&bus);
        let mut ticks = coordinator.subscribe();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(coordinator.run(cancel.clone()));

        for i in 0..5 {
            bus.publish(StoreEvent::new("project.updated").with_entity("project", i));
        }

        tokio::time::timeout(Duration::from_millis(500), ticks.recv())
            .await
            .expect("tick should arrive")
            .expect("channel open");

        // The burst was absorbed into that one tick.
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(matches!(
            ticks.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        cancel.cancel();
        task.await.expect("task should exit cleanly");
    }

    #[tokio::test]
    async fn separate_bursts_yield_separate_ticks() {
        let bus = EventBus::default();
        let coordinator = coordinator(&bus);
        let mut ticks = coordinator.subscribe();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(coordinator.run(cancel.clone()));

        bus.publish(StoreEvent::new("project.created"));
        tokio::time::timeout(Duration::from_millis(500), ticks.recv())
            .await
            .expect("first tick")
            .expect("channel open");

        bus.publish(StoreEvent::new("project.completed"));
        tokio::time::timeout(Duration::from_millis(500), ticks.recv())
            .await
            .expect("second tick")
            .expect("channel open");

        cancel.cancel();
        task.await.expect("task should exit cleanly");
    }

    #[tokio::test]
    async fn quiet_bus_emits_no_ticks() {
        let bus = EventBus::default();
        let coordinator = coordinator(&bus);
        let mut ticks = coordinator.subscribe();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(coordinator.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(matches!(
            ticks.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        cancel.cancel();
        task.await.expect("task should exit cleanly");
    }
}
