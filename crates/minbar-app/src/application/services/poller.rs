use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::RefreshCoordinator;

/// Periodic refresh driver for the live dashboard.
///
/// Fires an immediate refresh on start, then one per interval, exactly the
/// way the dashboard refreshes on mount and every 30 seconds after. The
/// task is tied to this handle: stopping it or dropping the handle aborts
/// the loop, so a torn-down view cannot leak a timer.
pub struct RefreshPoller {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshPoller {
    pub fn start(coordinator: Arc<RefreshCoordinator>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // first tick completes immediately
                ticker.tick().await;
                coordinator.refresh().await;
            }
        });

        info!(interval_secs = interval.as_secs(), "Refresh poller started");

        Self {
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Stop polling. Idempotent.
    pub fn stop(&self) {
        if let Some(handle) = self.handle.lock().expect("poller lock poisoned").take() {
            handle.abort();
            info!("Refresh poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .expect("poller lock poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RefreshPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
