//! Addressable configuration keys for `config get/set/list`.

use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

/// A `section.key` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ZonesNearRadiusKm,
    ZonesMediumRadiusKm,
    DwellAlertThresholdSecs,
    DwellTickIntervalSecs,
    DatasetPath,
    LoggingDirectory,
    LoggingLevel,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ZonesNearRadiusKm,
            ConfigKey::ZonesMediumRadiusKm,
            ConfigKey::DwellAlertThresholdSecs,
            ConfigKey::DwellTickIntervalSecs,
            ConfigKey::DatasetPath,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingLevel,
        ]
    }

    /// INI section.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ZonesNearRadiusKm | ConfigKey::ZonesMediumRadiusKm => "zones",
            ConfigKey::DwellAlertThresholdSecs | ConfigKey::DwellTickIntervalSecs => "dwell",
            ConfigKey::DatasetPath => "dataset",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    /// Key within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ZonesNearRadiusKm => "near_radius_km",
            ConfigKey::ZonesMediumRadiusKm => "medium_radius_km",
            ConfigKey::DwellAlertThresholdSecs => "alert_threshold_secs",
            ConfigKey::DwellTickIntervalSecs => "tick_interval_secs",
            ConfigKey::DatasetPath => "path",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ZonesNearRadiusKm => config.zones.near_radius_km.to_string(),
            ConfigKey::ZonesMediumRadiusKm => config.zones.medium_radius_km.to_string(),
            ConfigKey::DwellAlertThresholdSecs => config.dwell.alert_threshold_secs.to_string(),
            ConfigKey::DwellTickIntervalSecs => config.dwell.tick_interval_secs.to_string(),
            ConfigKey::DatasetPath => path_value(&config.dataset.path),
            ConfigKey::LoggingDirectory => path_value(&config.logging.directory),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validate and store a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ZonesNearRadiusKm => {
                config.zones.near_radius_km = self.positive(value)?;
            }
            ConfigKey::ZonesMediumRadiusKm => {
                config.zones.medium_radius_km = self.positive(value)?;
            }
            ConfigKey::DwellAlertThresholdSecs => {
                config.dwell.alert_threshold_secs = self.positive(value)?;
            }
            ConfigKey::DwellTickIntervalSecs => {
                config.dwell.tick_interval_secs = self.positive(value)?;
            }
            ConfigKey::DatasetPath => config.dataset.path = optional_path(value),
            ConfigKey::LoggingDirectory => config.logging.directory = optional_path(value),
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(
                        self.invalid(value, "expected one of trace, debug, info, warn, error")
                    );
                }
                config.logging.level = level;
            }
        }
        Ok(())
    }

    fn positive(&self, value: &str) -> Result<f64, ConfigError> {
        let parsed: f64 = value
            .parse()
            .map_err(|_| self.invalid(value, "expected a number"))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(self.invalid(value, "must be a positive number"));
        }
        Ok(parsed)
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

fn path_value(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
