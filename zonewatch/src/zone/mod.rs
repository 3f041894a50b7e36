//! Zone classification.
//!
//! Maps a location and the incident dataset to a [`ZoneState`] using a
//! tiered worst-wins policy:
//!
//! ```text
//! any danger record within near radius   → danger
//! else any warning record within radius  → warning
//! else (including no records at all)     → safe
//! ```
//!
//! Severity is not distance-weighted: a danger record at the edge of the near
//! radius outranks a warning record next to the subject. Absence of data is
//! treated as safe so that unknown areas never block monitoring.

mod classifier;
mod state;
mod stats;

pub use classifier::{
    ClassifierConfig, ZoneClassifier, DEFAULT_MEDIUM_RADIUS_KM, DEFAULT_NEAR_RADIUS_KM,
};
pub use state::{ParseZoneError, ZoneState};
pub use stats::{AreaStatistics, RiskLevel};
