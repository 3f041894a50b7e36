//! CLI error type.

use std::fmt;

use zonewatch::config::ConfigError;
use zonewatch::geo::GeoError;
use zonewatch::incident::DatasetError;
use zonewatch::logging::LoggingError;
use zonewatch::monitor::MonitorError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Invalid setting or argument combination.
    Config(String),
    /// Config file could not be read or written.
    ConfigFile(ConfigError),
    /// Incident dataset could not be loaded.
    Dataset(DatasetError),
    /// Logging could not be initialized.
    Logging(LoggingError),
    /// Coordinates out of range.
    Location(GeoError),
    /// Malformed location input line.
    Input { line: usize, message: String },
    /// Monitor lifecycle failure.
    Monitor(MonitorError),
    /// Reading input failed.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Dataset(e) => write!(f, "Dataset error: {}", e),
            CliError::Logging(e) => write!(f, "{}", e),
            CliError::Location(e) => write!(f, "{}", e),
            CliError::Input { line, message } => write!(f, "Input line {}: {}", line, message),
            CliError::Monitor(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Dataset(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Location(e) => Some(e),
            CliError::Monitor(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Config(_) | CliError::Input { .. } => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        CliError::Dataset(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<GeoError> for CliError {
    fn from(e: GeoError) -> Self {
        CliError::Location(e)
    }
}

impl From<MonitorError> for CliError {
    fn from(e: MonitorError) -> Self {
        CliError::Monitor(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
