//! User configuration stored in `~/.zonewatch/config.ini`.
//!
//! ```ini
//! [zones]
//! near_radius_km = 10
//! medium_radius_km = 20
//!
//! [dwell]
//! alert_threshold_secs = 300
//! tick_interval_secs = 1
//!
//! [dataset]
//! path =
//!
//! [logging]
//! directory =
//! level = info
//! ```
//!
//! An empty `dataset.path` selects the built-in sample dataset; an empty
//! `logging.directory` disables the log file.

mod file;
mod keys;

use std::path::PathBuf;

pub use file::{
    ConfigError, ConfigFile, DatasetSettings, DwellSettings, LoggingSettings, ZonesSettings,
};
pub use keys::ConfigKey;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// `~/.zonewatch`, or `./.zonewatch` when no home directory is known.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".zonewatch")
}

/// Full path of the config file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}
