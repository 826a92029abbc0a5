//! Reservation Sweeper Service
//!
//! Periodic reconciliation of overdue holds. Reservation deadlines are
//! advisory until acted upon; this service calls the engine's sweep on an
//! interval so overdue holds flow back to available stock even when no
//! caller touches them.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::ports::EventPublisherPort;
use crate::application::services::stock_engine::StockEngine;
use crate::config::SweeperConfig;
use crate::domain::stock_control::repository::InventoryStore;

/// Handle to a running sweeper. Dropping the handle does not stop the
/// task; call [`SweeperHandle::shutdown`] for a clean stop.
pub struct SweeperHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for the task to finish.
    pub async fn shutdown(self) {
        // Receiver side may already be gone if the task panicked.
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            tracing::error!("reservation sweeper task failed: {e}");
        }
    }
}

/// Spawn the periodic expiry sweep onto the current tokio runtime.
///
/// Returns `None` when the sweeper is disabled in configuration; expiry
/// then happens only lazily through `expire_reservation`.
pub fn spawn_sweeper<S, E>(
    engine: Arc<StockEngine<S, E>>,
    config: &SweeperConfig,
) -> Option<SweeperHandle>
where
    S: InventoryStore + 'static,
    E: EventPublisherPort + 'static,
{
    if !config.enabled {
        tracing::info!("reservation sweeper disabled, expiry is lazy only");
        return None;
    }

    let interval = config.interval();
    let (stop, mut stopped) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a freshly started
        // sweeper does not race its own setup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match engine.expire_due_reservations().await {
                        Ok(expired) if !expired.is_empty() => {
                            tracing::debug!(count = expired.len(), "sweep pass expired reservations");
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!("sweep pass failed: {e}");
                        }
                    }
                }
                changed = stopped.changed() => {
                    // Stop on the shutdown signal, and also when the
                    // handle was dropped without one.
                    if changed.is_err() || *stopped.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("reservation sweeper stopped");
    });

    Some(SweeperHandle { stop, task })
}
