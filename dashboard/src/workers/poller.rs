//! Polling worker for periodic status checks

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info};

use crate::sync::controller::Controller;

/// Default time between two polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poller worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Polling interval
    pub interval: Duration,

    /// Delay before the first poll
    pub initial_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            initial_delay: Duration::ZERO,
        }
    }
}

/// Run the poller worker
///
/// Loads the first snapshot right away, then checks once per interval until
/// the shutdown signal fires or the controller is closed. A check still in
/// flight at shutdown is abandoned. A failed check does not stop polling.
pub async fn run<S, F>(
    options: &Options,
    controller: &Controller,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Poller worker starting...");

    tokio::select! {
        _ = &mut shutdown_signal => {
            info!("Poller worker shutting down...");
            return;
        }
        _ = sleep_fn(options.initial_delay) => {}
    }

    loop {
        debug!("Polling for stack status updates...");

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Poller worker shutting down...");
                return;
            }
            outcome = controller.check_for_update() => {
                debug!("Poll finished: {:?}", outcome);
            }
        }

        if controller.is_closed() {
            info!("Controller closed, stopping poller");
            return;
        }

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Poller worker shutting down...");
                return;
            }
            _ = sleep_fn(options.interval) => {}
        }
    }
}
