//! Dwell tracking and the emergency alert state machine.
//!
//! Consumes one zone classification per tick and tracks how long the subject
//! has continuously been in the danger zone.
//!
//! # State Machine
//!
//! ```text
//!                     non-danger tick (counter = 0, flag cleared)
//!        ┌───────────────────────────────────────────────────────────┐
//!        ▼                                                           │
//! Safe / Warning --[danger]--> DangerCounting --[counter ≥ threshold]--> DangerAlerted
//!                              (counter += dt)    (one alert fired)     (counter += dt,
//!                                                                        no more alerts)
//! ```
//!
//! The "alerted" flag guarantees at most one alert per continuous dwell
//! episode. Re-checking the threshold on every tick without it would re-fire
//! the alert on each tick after the threshold is crossed.
//!
//! The transition is a pure function over an explicit [`DwellSession`] value;
//! [`DwellTracker`] is a thin owner of one session for callers that prefer
//! `&mut self` updates.

mod session;
mod tracker;

pub use session::{DwellSession, DwellState, TickOutcome};
pub use tracker::{
    format_dwell, DwellConfig, DwellTracker, DEFAULT_ALERT_THRESHOLD_SECS, DEFAULT_TICK_INTERVAL,
};
