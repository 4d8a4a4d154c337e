use std::time::Duration;

use shared::error::ClassifiedError;
use tokio::{
    sync::broadcast,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{config::ClientConfig, error::TransportError, transport::Transport};

const STATUS_CHANNEL_CAPACITY: usize = 64;

/// Periodically probes the service and reports network failures.
///
/// Independent of the application flow and of the session: it never reads
/// or changes either.
pub struct ConnectivityMonitor<T> {
    transport: T,
    period: Duration,
    slow_threshold: Option<Duration>,
}

impl<T: Transport + 'static> ConnectivityMonitor<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            // tokio intervals reject a zero period
            period: config.probe_interval.max(Duration::from_millis(1)),
            slow_threshold: config.slow_probe_threshold,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// One probe. A successful probe reports nothing unless it was slower
    /// than the configured threshold.
    pub async fn tick(&self, cancel: &CancellationToken) -> Option<ClassifiedError> {
        match self.transport.probe_connectivity(cancel).await {
            Ok(outcome) => match self.slow_threshold {
                Some(threshold) if outcome.elapsed > threshold => {
                    warn!(
                        elapsed_ms = outcome.elapsed.as_millis() as u64,
                        threshold_ms = threshold.as_millis() as u64,
                        "monitor: slow probe"
                    );
                    Some(ClassifiedError::network_slow())
                }
                _ => None,
            },
            Err(TransportError::Cancelled) => {
                debug!("monitor: probe cancelled");
                None
            }
            Err(error) => {
                warn!(%error, "monitor: probe failed");
                Some(ClassifiedError::network_unreachable())
            }
        }
    }

    /// Runs ticks every period until [`MonitorHandle::shutdown`].
    ///
    /// The first probe happens one full period after spawning. A probe that
    /// outlasts the period delays the schedule instead of overlapping with
    /// the next tick.
    pub fn spawn(self) -> MonitorHandle {
        let (events, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_monitor(self, events.clone(), cancel.clone()));
        MonitorHandle {
            events,
            cancel,
            task,
        }
    }
}

async fn run_monitor<T: Transport + 'static>(
    monitor: ConnectivityMonitor<T>,
    events: broadcast::Sender<ClassifiedError>,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + monitor.period, monitor.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(period_ms = monitor.period.as_millis() as u64, "monitor: started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let Some(failure) = monitor.tick(&cancel).await else {
            continue;
        };
        if events.send(failure.clone()).is_err() {
            warn!(error = %failure, "monitor: no status subscriber for connectivity failure");
        }
    }

    info!("monitor: stopped");
}

pub struct MonitorHandle {
    events: broadcast::Sender<ClassifiedError>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<ClassifiedError> {
        self.events.subscribe()
    }

    /// Cancels any in-flight probe and waits for the task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(error) = self.task.await {
            warn!(%error, "monitor: task ended abnormally");
        }
    }
}

#[cfg(test)]
#[path = "tests/monitor_tests.rs"]
mod tests;
