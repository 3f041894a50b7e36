//! Async monitor driven by a location stream.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::dwell::DwellSession;
use crate::incident::IncidentIndex;

use super::{LocationSample, MonitorConfig, MonitorEvents, MonitorSession};

/// Errors from the monitor lifecycle.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// `start` was called while a session is active.
    #[error("Monitor is already running")]
    AlreadyRunning,

    /// No session to wait for.
    #[error("Monitor is not running")]
    NotRunning,

    /// The monitoring task panicked or was aborted.
    #[error("Monitor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

struct RunningMonitor {
    cancellation: CancellationToken,
    handle: JoinHandle<DwellSession>,
}

/// Consumes a location stream and emits zone changes and alerts.
///
/// Each position sample is classified and ticked immediately. Between samples
/// a heartbeat re-ticks the last zone every `tick_interval`, so dwell keeps
/// accruing while the subject stands still. Elapsed time is measured on the
/// tokio clock from the previous tick. An unavailable sample holds the zone
/// and suspends ticking; the gap is never counted as dwell.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tokio::sync::mpsc;
/// use zonewatch::incident::{IncidentIndex, SampleDataset};
/// use zonewatch::monitor::{ChannelEvents, LocationSample, MonitorConfig, SafetyMonitor};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let index = Arc::new(IncidentIndex::new());
/// index.refresh(&SampleDataset)?;
///
/// let mut monitor = SafetyMonitor::new(MonitorConfig::default(), index);
/// let (events, mut event_rx) = ChannelEvents::channel();
/// let (tx, rx) = mpsc::unbounded_channel();
/// monitor.start(rx, Arc::new(events))?;
///
/// tx.send(LocationSample::position(28.6139, 77.2090)?)?;
/// if let Some(event) = event_rx.recv().await {
///     println!("{event:?}");
/// }
/// monitor.stop();
/// # Ok(())
/// # }
/// ```
pub struct SafetyMonitor {
    config: MonitorConfig,
    index: Arc<IncidentIndex>,
    running: Option<RunningMonitor>,
}

impl SafetyMonitor {
    /// Create an idle monitor over a shared incident index.
    pub fn new(config: MonitorConfig, index: Arc<IncidentIndex>) -> Self {
        Self {
            config,
            index,
            running: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Whether a monitoring task is active.
    ///
    /// Becomes false once the stream ends or after [`SafetyMonitor::stop`].
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Begin consuming `samples`, reporting through `events`.
    ///
    /// A fresh dwell session is created for each start. Must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::AlreadyRunning`] if a previous session is still
    /// active.
    pub fn start(
        &mut self,
        samples: mpsc::UnboundedReceiver<LocationSample>,
        events: Arc<dyn MonitorEvents>,
    ) -> Result<(), MonitorError> {
        if self.is_running() {
            return Err(MonitorError::AlreadyRunning);
        }

        let cancellation = CancellationToken::new();
        let session = MonitorSession::new(self.config.clone(), Arc::clone(&self.index));
        let handle = tokio::spawn(run(
            session,
            samples,
            events,
            self.config.dwell.tick_interval,
            cancellation.clone(),
        ));

        tracing::info!(
            near_radius_km = self.config.classifier.near_radius_km,
            alert_threshold_secs = self.config.dwell.alert_threshold_secs,
            records = self.index.len(),
            "Safety monitor started"
        );
        self.running = Some(RunningMonitor {
            cancellation,
            handle,
        });
        Ok(())
    }

    /// Stop monitoring and discard the session.
    ///
    /// Pending heartbeats are cancelled and no further events are emitted.
    /// Returns false if nothing was running.
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };
        running.cancellation.cancel();
        running.handle.abort();
        tracing::info!("Safety monitor stopped");
        true
    }

    /// Wait for the stream to end and return the final dwell session.
    ///
    /// Cancel safe: if the returned future is dropped early the session keeps
    /// running and can still be stopped.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::NotRunning`] if no session was started, or
    /// [`MonitorError::TaskFailed`] if the task did not complete normally.
    pub async fn join(&mut self) -> Result<DwellSession, MonitorError> {
        let running = self.running.as_mut().ok_or(MonitorError::NotRunning)?;
        let result = (&mut running.handle).await;
        self.running = None;
        Ok(result?)
    }
}

impl Drop for SafetyMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SafetyMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafetyMonitor")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run(
    mut session: MonitorSession,
    mut samples: mpsc::UnboundedReceiver<LocationSample>,
    events: Arc<dyn MonitorEvents>,
    tick_interval: std::time::Duration,
    cancellation: CancellationToken,
) -> DwellSession {
    let mut last_tick = Instant::now();
    let mut heartbeat = tokio::time::interval_at(last_tick + tick_interval, tick_interval);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = cancellation.cancelled() => break,

            sample = samples.recv() => {
                let Some(sample) = sample else { break };
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick).as_secs_f64();
                session.process_sample(sample, elapsed, events.as_ref());
                last_tick = now;
                heartbeat.reset();
            }

            _ = heartbeat.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick).as_secs_f64();
                session.heartbeat(elapsed, events.as_ref());
                last_tick = now;
            }
        }
    }

    tracing::debug!(dwell = %session.dwell().state(), "Monitoring loop ended");
    session.dwell()
}
