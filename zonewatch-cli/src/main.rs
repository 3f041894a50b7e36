//! ZoneWatch CLI - Command-line interface
//!
//! Classifies locations against an incident dataset and monitors a location
//! stream for prolonged danger-zone dwell.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::classify::ClassifyArgs;
use commands::config::ConfigCommands;
use commands::monitor::MonitorArgs;
use commands::stats::StatsArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "zonewatch")]
#[command(version = zonewatch::VERSION)]
#[command(about = "Location safety monitor with dwell-time emergency alerts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single location into a risk zone
    Classify {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Incident dataset JSON file (default: config, then built-in sample)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Override the classification radius in kilometres
        #[arg(long)]
        near_radius_km: Option<f64>,
    },

    /// Show incident statistics around a location
    Stats {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Incident dataset JSON file (default: config, then built-in sample)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Override the statistics radius in kilometres
        #[arg(long)]
        radius_km: Option<f64>,
    },

    /// Monitor a stream of locations ("lat,lng" or "unavailable" per line)
    Monitor {
        /// Read samples from a file instead of stdin
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Incident dataset JSON file (default: config, then built-in sample)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Process lines immediately, one nominal tick apart
        #[arg(long)]
        replay: bool,

        /// Seconds to wait between input lines in live mode
        #[arg(long, conflicts_with = "replay")]
        pace: Option<f64>,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Classify {
            lat,
            lng,
            dataset,
            near_radius_km,
        } => commands::classify::run(ClassifyArgs {
            lat,
            lng,
            dataset,
            near_radius_km,
        }),
        Commands::Stats {
            lat,
            lng,
            dataset,
            radius_km,
        } => commands::stats::run(StatsArgs {
            lat,
            lng,
            dataset,
            radius_km,
        }),
        Commands::Monitor {
            input,
            dataset,
            replay,
            pace,
        } => commands::monitor::run(MonitorArgs {
            input,
            dataset,
            replay,
            pace,
        }),
        Commands::Config { command } => commands::config::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "zonewatch", "classify", "--lat", "-33.8688", "--lng", "151.2093",
        ])
        .unwrap();
        match cli.command {
            Commands::Classify { lat, lng, .. } => {
                assert_eq!(lat, -33.8688);
                assert_eq!(lng, 151.2093);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_replay_conflicts_with_pace() {
        let result = Cli::try_parse_from(["zonewatch", "monitor", "--replay", "--pace", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from([
            "zonewatch",
            "config",
            "set",
            "dwell.alert_threshold_secs",
            "120",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { .. }
            }
        ));
    }
}
