//! Location monitoring facade.
//!
//! Wires a stream of [`LocationSample`]s through the zone classifier and the
//! dwell tracker, reporting through a [`MonitorEvents`] implementation:
//!
//! - `on_zone_change` fires on the first classification and whenever the
//!   label differs from the last emitted one.
//! - `on_alert` fires at most once per continuous danger episode.
//!
//! [`MonitorSession`] is the synchronous core and can be driven with explicit
//! elapsed times (replay, tests). [`SafetyMonitor`] runs it as a tokio task
//! with a heartbeat and measured time.

mod config;
mod events;
mod service;
mod session;

pub use config::MonitorConfig;
pub use events::{AlertEvent, ChannelEvents, LocationSample, MonitorEvent, MonitorEvents};
pub use service::{MonitorError, SafetyMonitor};
pub use session::{MonitorSession, StepReport};
