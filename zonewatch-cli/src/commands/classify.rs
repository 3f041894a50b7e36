//! Classify command - zone for a single location.

use std::path::PathBuf;

use zonewatch::zone::ZoneClassifier;

use super::common::{coordinate, styled_risk, styled_zone};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the classify command.
pub struct ClassifyArgs {
    pub lat: f64,
    pub lng: f64,
    pub dataset: Option<PathBuf>,
    pub near_radius_km: Option<f64>,
}

/// Run the classify command.
pub fn run(args: ClassifyArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("classify");

    let location = coordinate(args.lat, args.lng)?;
    let mut config = runner.monitor_config().classifier;
    if let Some(km) = args.near_radius_km {
        if !km.is_finite() || km <= 0.0 {
            return Err(CliError::Config(format!(
                "near radius must be a positive number of kilometres, got {}",
                km
            )));
        }
        config = config.with_near_radius_km(km);
    }

    let index = runner.load_index(args.dataset.as_deref())?;
    let snapshot = index.snapshot();
    let classifier = ZoneClassifier::new(config);
    let zone = classifier.classify(location, &snapshot);
    let stats = classifier.area_statistics(location, &snapshot);

    println!("Location: {}", location);
    println!("Zone:     {}", styled_zone(zone));
    println!();
    println!(
        "Within {} km: {} records, {} reported cases, risk {}",
        stats.radius_km,
        stats.total_records,
        stats.total_cases,
        styled_risk(stats.nearby_risk)
    );

    let nearest = snapshot
        .query(location, config.near_radius_km)
        .into_iter()
        .filter(|record| record.zone == zone)
        .min_by(|a, b| {
            let da = zonewatch::geo::distance_km(location, a.location);
            let db = zonewatch::geo::distance_km(location, b.location);
            da.total_cmp(&db)
        });
    if let Some(record) = nearest {
        println!(
            "Deciding record: {} ({:.1} km, severity {})",
            record.place_name(),
            zonewatch::geo::distance_km(location, record.location),
            record.severity
        );
    }

    Ok(())
}
