//! Stats command - incident statistics around a location.

use std::path::PathBuf;

use zonewatch::zone::ZoneClassifier;

use super::common::{coordinate, styled_risk};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the stats command.
pub struct StatsArgs {
    pub lat: f64,
    pub lng: f64,
    pub dataset: Option<PathBuf>,
    pub radius_km: Option<f64>,
}

/// Run the stats command.
pub fn run(args: StatsArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("stats");

    let location = coordinate(args.lat, args.lng)?;
    let mut config = runner.monitor_config().classifier;
    if let Some(km) = args.radius_km {
        if !km.is_finite() || km <= 0.0 {
            return Err(CliError::Config(format!(
                "radius must be a positive number of kilometres, got {}",
                km
            )));
        }
        config = config.with_medium_radius_km(km);
    }

    let index = runner.load_index(args.dataset.as_deref())?;
    let stats = ZoneClassifier::new(config).area_statistics(location, &index.snapshot());

    println!("Incident Statistics");
    println!("===================");
    println!();
    println!("Location:       {}", location);
    println!("Radius:         {} km", stats.radius_km);
    println!("Records:        {}", stats.total_records);
    println!("  Danger:       {}", stats.danger_records);
    println!("  Warning:      {}", stats.warning_records);
    println!("  Safe:         {}", stats.safe_records);
    println!("Reported cases: {}", stats.total_cases);
    match stats.max_severity {
        Some(severity) => println!("Max severity:   {}", severity),
        None => println!("Max severity:   (none)"),
    }
    println!("Nearby risk:    {}", styled_risk(stats.nearby_risk));

    Ok(())
}
