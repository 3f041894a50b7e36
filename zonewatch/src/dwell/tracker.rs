//! Session-owning dwell tracker.

use std::time::Duration;

use crate::zone::ZoneState;

use super::{DwellSession, DwellState, TickOutcome};

/// Default continuous danger dwell before alerting (5 minutes).
pub const DEFAULT_ALERT_THRESHOLD_SECS: f64 = 300.0;

/// Default nominal tick interval.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Dwell tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellConfig {
    /// Continuous seconds in danger before the alert fires.
    pub alert_threshold_secs: f64,
    /// Nominal tick interval; the tracker itself accepts any elapsed value.
    pub tick_interval: Duration,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            alert_threshold_secs: DEFAULT_ALERT_THRESHOLD_SECS,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl DwellConfig {
    /// Set the alert threshold.
    pub fn with_alert_threshold_secs(mut self, secs: f64) -> Self {
        self.alert_threshold_secs = secs;
        self
    }

    /// Set the nominal tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

/// Owns one [`DwellSession`] and logs its transitions.
#[derive(Debug, Clone, Default)]
pub struct DwellTracker {
    config: DwellConfig,
    session: DwellSession,
}

impl DwellTracker {
    /// Create a tracker with a fresh session.
    pub fn new(config: DwellConfig) -> Self {
        Self {
            config,
            session: DwellSession::new(),
        }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DwellConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &DwellConfig {
        &self.config
    }

    /// Current session value.
    pub fn session(&self) -> DwellSession {
        self.session
    }

    /// Current state.
    pub fn state(&self) -> DwellState {
        self.session.state()
    }

    /// Advance by one tick.
    pub fn tick(&mut self, elapsed_secs: f64, zone: ZoneState) -> TickOutcome {
        let previous = self.session.state();
        let (next, outcome) = self
            .session
            .tick(elapsed_secs, zone, self.config.alert_threshold_secs);
        self.session = next;

        if outcome.alert_fired {
            tracing::debug!(
                dwell_secs = outcome.counter_secs,
                threshold_secs = self.config.alert_threshold_secs,
                "Danger zone dwell threshold reached"
            );
        } else if previous != outcome.state {
            tracing::debug!(
                from = %previous,
                to = %outcome.state,
                counter_secs = outcome.counter_secs,
                "Dwell state transition"
            );
        }

        outcome
    }

    /// Discard the session and start over in the initial state.
    pub fn reset(&mut self) {
        self.session = DwellSession::new();
    }
}

/// Format a dwell duration as `m:ss`.
///
/// Fractional seconds are truncated; negative or non-finite input shows `0:00`.
pub fn format_dwell(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}
