//! Shared setup for commands: config, logging, dataset.

use std::path::Path;
use std::sync::Arc;

use zonewatch::config::ConfigFile;
use zonewatch::incident::{IncidentIndex, IncidentSource, JsonFileSource, SampleDataset};
use zonewatch::logging::{init_logging, LoggingGuard};
use zonewatch::monitor::MonitorConfig;

use crate::error::CliError;

/// Loaded configuration plus the logging guard for the command's lifetime.
pub struct CliRunner {
    config: ConfigFile,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Load the config file and initialize logging.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging = init_logging(&config.logging.level, config.logging.directory.as_deref())?;
        Ok(Self {
            config,
            _logging: logging,
        })
    }

    /// Log the command and version.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            command,
            version = zonewatch::VERSION,
            dataset = ?self.config.dataset.path,
            "ZoneWatch starting"
        );
    }

    /// Monitor settings from the config file.
    pub fn monitor_config(&self) -> MonitorConfig {
        self.config.monitor_config()
    }

    /// Load the incident index from `dataset`, the configured path, or the
    /// built-in sample, in that order.
    pub fn load_index(&self, dataset: Option<&Path>) -> Result<Arc<IncidentIndex>, CliError> {
        let path = dataset.or(self.config.dataset.path.as_deref());
        let source: Box<dyn IncidentSource> = match path {
            Some(path) => Box::new(JsonFileSource::new(path)),
            None => Box::new(SampleDataset),
        };

        let index = IncidentIndex::new();
        index.refresh(source.as_ref())?;
        tracing::debug!(source = source.name(), records = index.len(), "Dataset ready");
        Ok(Arc::new(index))
    }
}
