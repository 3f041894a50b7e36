//! Monitor configuration.

use std::time::Duration;

use crate::dwell::DwellConfig;
use crate::zone::ClassifierConfig;

/// Configuration for a monitoring session, combining all component configs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorConfig {
    /// Classification radii.
    pub classifier: ClassifierConfig,
    /// Dwell threshold and tick interval.
    pub dwell: DwellConfig,
}

impl MonitorConfig {
    /// Create a configuration from component configs.
    pub fn new(classifier: ClassifierConfig, dwell: DwellConfig) -> Self {
        Self { classifier, dwell }
    }

    /// Set the near radius.
    pub fn with_near_radius_km(mut self, km: f64) -> Self {
        self.classifier.near_radius_km = km;
        self
    }

    /// Set the medium radius.
    pub fn with_medium_radius_km(mut self, km: f64) -> Self {
        self.classifier.medium_radius_km = km;
        self
    }

    /// Set the dwell alert threshold.
    pub fn with_alert_threshold_secs(mut self, secs: f64) -> Self {
        self.dwell.alert_threshold_secs = secs;
        self
    }

    /// Set the nominal tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.dwell.tick_interval = interval;
        self
    }

    /// Nominal tick interval in seconds.
    pub fn tick_interval_secs(&self) -> f64 {
        self.dwell.tick_interval.as_secs_f64()
    }
}
