//! ZoneWatch - Location safety monitoring
//!
//! This library classifies a subject's position into a risk zone using a
//! dataset of geo-tagged incident records, and raises an emergency alert when
//! the subject dwells in a danger zone beyond a configured threshold.
//!
//! # Architecture
//!
//! ```text
//! LocationSample ──► ZoneClassifier ──► DwellTracker ──► MonitorEvents
//!                    (IncidentIndex,    (DwellSession)   (zone change, alert)
//!                     geo::distance_km)
//! ```
//!
//! The classifier and the tracker are pure: the classifier reads one dataset
//! snapshot per call, and the tracker transforms an explicit [`dwell::DwellSession`]
//! value. The [`monitor`] module wires them to a location stream.

pub mod config;
pub mod dwell;
pub mod geo;
pub mod incident;
pub mod logging;
pub mod monitor;
pub mod zone;

/// Library version, as declared in the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
