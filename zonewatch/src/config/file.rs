//! INI configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::dwell::{DwellConfig, DEFAULT_ALERT_THRESHOLD_SECS, DEFAULT_TICK_INTERVAL};
use crate::monitor::MonitorConfig;
use crate::zone::{ClassifierConfig, DEFAULT_MEDIUM_RADIUS_KM, DEFAULT_NEAR_RADIUS_KM};

use super::config_file_path;

/// Errors reading, writing or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Invalid config file: {0}")]
    Parse(#[from] ini::ParseError),

    /// A value failed validation.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The key is not recognized.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[zones]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonesSettings {
    pub near_radius_km: f64,
    pub medium_radius_km: f64,
}

impl Default for ZonesSettings {
    fn default() -> Self {
        Self {
            near_radius_km: DEFAULT_NEAR_RADIUS_KM,
            medium_radius_km: DEFAULT_MEDIUM_RADIUS_KM,
        }
    }
}

/// `[dwell]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellSettings {
    pub alert_threshold_secs: f64,
    pub tick_interval_secs: f64,
}

impl Default for DwellSettings {
    fn default() -> Self {
        Self {
            alert_threshold_secs: DEFAULT_ALERT_THRESHOLD_SECS,
            tick_interval_secs: DEFAULT_TICK_INTERVAL.as_secs_f64(),
        }
    }
}

/// `[dataset]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSettings {
    /// JSON incident file; `None` selects the built-in sample dataset.
    pub path: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for the log file; `None` logs to stderr only.
    pub directory: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            level: "info".to_string(),
        }
    }
}

/// Parsed `config.ini`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub zones: ZonesSettings,
    pub dwell: DwellSettings,
    pub dataset: DatasetSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse INI text. Missing sections and keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(content)?;
        let mut config = Self::default();

        for key in super::ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        self.to_ini().write_to_file(path).map_err(io_err)?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in super::ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Build the monitor configuration from the file's settings.
    pub fn monitor_config(&self) -> MonitorConfig {
        let classifier = ClassifierConfig::default()
            .with_near_radius_km(self.zones.near_radius_km)
            .with_medium_radius_km(self.zones.medium_radius_km);
        let tick_interval = Duration::try_from_secs_f64(self.dwell.tick_interval_secs)
            .ok()
            .filter(|interval| !interval.is_zero())
            .unwrap_or(DEFAULT_TICK_INTERVAL);
        let dwell = DwellConfig::default()
            .with_alert_threshold_secs(self.dwell.alert_threshold_secs)
            .with_tick_interval(tick_interval);
        MonitorConfig::new(classifier, dwell)
    }
}
