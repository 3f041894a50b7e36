//! Dwell session value and its pure transition function.

use serde::Serialize;

use crate::zone::ZoneState;

/// States of the dwell/alert machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DwellState {
    /// Last tick reported the safe zone.
    #[default]
    Safe,
    /// Last tick reported the warning zone.
    Warning,
    /// In danger, threshold not yet reached.
    DangerCounting,
    /// In danger, alert already fired for this episode.
    DangerAlerted,
}

impl DwellState {
    /// The zone this state corresponds to.
    pub fn zone(&self) -> ZoneState {
        match self {
            DwellState::Safe => ZoneState::Safe,
            DwellState::Warning => ZoneState::Warning,
            DwellState::DangerCounting | DwellState::DangerAlerted => ZoneState::Danger,
        }
    }

    /// Whether this is one of the danger states.
    pub fn is_danger(&self) -> bool {
        matches!(self, DwellState::DangerCounting | DwellState::DangerAlerted)
    }
}

impl std::fmt::Display for DwellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DwellState::Safe => write!(f, "safe"),
            DwellState::Warning => write!(f, "warning"),
            DwellState::DangerCounting => write!(f, "danger (counting)"),
            DwellState::DangerAlerted => write!(f, "danger (alerted)"),
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOutcome {
    /// State after the tick.
    pub state: DwellState,
    /// Continuous seconds in danger after the tick (0 outside danger).
    pub counter_secs: f64,
    /// Whether this tick fired the episode's alert.
    pub alert_fired: bool,
}

/// Per-subject dwell state.
///
/// A plain `Copy` value: [`DwellSession::tick`] consumes one session and
/// returns the next. Initial state is [`DwellState::Safe`] with a zero counter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwellSession {
    state: DwellState,
    counter_secs: f64,
    alerted: bool,
}

impl DwellSession {
    /// A fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DwellState {
        self.state
    }

    /// Continuous seconds spent in danger in the current episode.
    pub fn counter_secs(&self) -> f64 {
        self.counter_secs
    }

    /// Whether the current episode's alert has fired.
    pub fn alerted(&self) -> bool {
        self.alerted
    }

    /// Seconds left before the alert fires, `None` outside a counting episode.
    pub fn remaining_secs(&self, threshold_secs: f64) -> Option<f64> {
        match self.state {
            DwellState::DangerCounting => Some((threshold_secs - self.counter_secs).max(0.0)),
            _ => None,
        }
    }

    /// Advance the session by one tick.
    ///
    /// `elapsed_secs` is whatever time the caller measured since the previous
    /// tick; negative or non-finite values count as zero. The transition is
    /// total: every input yields a defined next session.
    pub fn tick(
        self,
        elapsed_secs: f64,
        zone: ZoneState,
        threshold_secs: f64,
    ) -> (DwellSession, TickOutcome) {
        let elapsed = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            elapsed_secs
        } else {
            0.0
        };

        let next = match zone {
            ZoneState::Safe => Self::outside_danger(DwellState::Safe),
            ZoneState::Warning => Self::outside_danger(DwellState::Warning),
            ZoneState::Danger => {
                // A new episode starts counting from this tick's elapsed time
                let counter = if self.state.is_danger() {
                    self.counter_secs + elapsed
                } else {
                    elapsed
                };
                let alerted = self.state.is_danger() && self.alerted;
                let state = if alerted {
                    DwellState::DangerAlerted
                } else {
                    DwellState::DangerCounting
                };
                DwellSession {
                    state,
                    counter_secs: counter,
                    alerted,
                }
            }
        };

        let fire = next.state == DwellState::DangerCounting && next.counter_secs >= threshold_secs;
        let next = if fire {
            DwellSession {
                state: DwellState::DangerAlerted,
                alerted: true,
                ..next
            }
        } else {
            next
        };

        let outcome = TickOutcome {
            state: next.state,
            counter_secs: next.counter_secs,
            alert_fired: fire,
        };
        (next, outcome)
    }

    fn outside_danger(state: DwellState) -> Self {
        Self {
            state,
            counter_secs: 0.0,
            alerted: false,
        }
    }
}
