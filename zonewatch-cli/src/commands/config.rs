//! `zonewatch config` subcommands.
//!
//! Settings are addressed as `section.key`. `set` validates the value, reports
//! what changed, and warns about combinations that load but make little sense.

use clap::Subcommand;
use console::style;
use zonewatch::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting name as section.key (e.g., dwell.alert_threshold_secs)
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting name as section.key (e.g., zones.near_radius_km)
        key: String,

        /// New value (empty to unset a path)
        value: String,
    },

    /// Print every setting grouped by section
    List,

    /// Print the config file location
    Path,
}

/// Outcome of applying one `config set`.
#[derive(Debug, PartialEq)]
struct SettingChange {
    key: ConfigKey,
    before: String,
    after: String,
    warnings: Vec<String>,
}

impl SettingChange {
    fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let key = lookup(&key)?;
            println!("{}", display_value(&key.get(&ConfigFile::load()?)));
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let key = lookup(&key)?;
            let mut config = ConfigFile::load()?;
            let change = apply(&mut config, key, &value)?;
            if change.changed() {
                config.save()?;
            }
            report(&change);
            Ok(())
        }
        ConfigCommands::List => {
            list(&ConfigFile::load()?);
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
    }
}

fn lookup(name: &str) -> Result<ConfigKey, CliError> {
    name.parse().map_err(|_| {
        let known: Vec<String> = ConfigKey::all().iter().map(|k| k.name()).collect();
        CliError::Config(format!(
            "no setting named '{}' (known: {})",
            name,
            known.join(", ")
        ))
    })
}

/// Validate and store `value`, returning the before/after pair.
fn apply(config: &mut ConfigFile, key: ConfigKey, value: &str) -> Result<SettingChange, CliError> {
    let before = key.get(config);
    key.set(config, value)?;
    let after = key.get(config);

    let mut warnings = Vec::new();
    if config.zones.near_radius_km > config.zones.medium_radius_km {
        warnings.push(format!(
            "zones.near_radius_km ({} km) exceeds zones.medium_radius_km ({} km)",
            config.zones.near_radius_km, config.zones.medium_radius_km
        ));
    }
    if config.dwell.tick_interval_secs > config.dwell.alert_threshold_secs {
        warnings.push(format!(
            "dwell.tick_interval_secs ({}) exceeds dwell.alert_threshold_secs ({}); \
             the alert can fire on the first danger tick",
            config.dwell.tick_interval_secs, config.dwell.alert_threshold_secs
        ));
    }

    Ok(SettingChange {
        key,
        before,
        after,
        warnings,
    })
}

fn report(change: &SettingChange) {
    let name = change.key.name();
    if change.changed() {
        println!(
            "{}: {} -> {}",
            name,
            display_value(&change.before),
            style(display_value(&change.after)).bold()
        );
    } else {
        println!("{} already {}", name, display_value(&change.after));
    }
    for warning in &change.warnings {
        eprintln!("{} {}", style("Warning:").yellow(), warning);
    }
}

fn list(config: &ConfigFile) {
    let mut section = "";
    for key in ConfigKey::all() {
        if key.section() != section {
            if !section.is_empty() {
                println!();
            }
            section = key.section();
            println!("[{}]", style(section).bold());
        }
        println!("  {} = {}", key.key_name(), display_value(&key.get(config)));
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}
