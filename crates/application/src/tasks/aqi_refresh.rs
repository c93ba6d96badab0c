//! Periodic air quality refresh
//!
//! Re-fetches the AQI for the displayed city on a fixed interval and
//! publishes each new value through a watch channel.

use std::sync::Arc;
use std::time::Duration;

use domain::{AqiResult, GeoLocation};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::services::DashboardService;

/// Default refresh interval
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to a running refresh task
///
/// The task is aborted when the handle is stopped or dropped.
#[derive(Debug)]
pub struct AqiRefreshHandle {
    task: JoinHandle<()>,
}

impl AqiRefreshHandle {
    /// Stop the refresh task
    pub fn stop(self) {
        self.task.abort();
    }

    /// Whether the task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AqiRefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a background task that refreshes the AQI every `interval`.
///
/// The first tick fires one full interval after spawning. A failed fetch is
/// logged and skipped so the last published value stays visible. The task
/// exits on its own once every receiver of `sender` is gone.
pub fn spawn_aqi_refresh_task(
    service: Arc<DashboardService>,
    location: GeoLocation,
    label: String,
    interval: Duration,
    sender: watch::Sender<Option<AqiResult>>,
) -> AqiRefreshHandle {
    info!(
        location = %label,
        interval_secs = interval.as_secs(),
        "Starting AQI refresh task"
    );

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                () = sender.closed() => {
                    debug!(location = %label, "All AQI receivers dropped, stopping refresh");
                    break;
                },
            }

            match service.air_quality(&location, &label).await {
                Ok(result) => {
                    debug!(location = %label, index = result.index, "AQI refreshed");
                    sender.send_replace(Some(result));
                },
                Err(e) => {
                    warn!(location = %label, error = %e, "AQI refresh failed, keeping previous value");
                },
            }
        }
    });

    AqiRefreshHandle { task }
}
