//! Common types and utilities shared across CLI commands.

use console::{style, StyledObject};
use zonewatch::dwell::{format_dwell, DwellSession};
use zonewatch::geo::Coordinate;
use zonewatch::monitor::LocationSample;
use zonewatch::zone::{RiskLevel, ZoneState};

use crate::error::CliError;

/// Parse and validate a coordinate from CLI arguments.
pub fn coordinate(lat: f64, lng: f64) -> Result<Coordinate, CliError> {
    Ok(Coordinate::new(lat, lng)?)
}

/// Parse one line of monitor input.
///
/// Accepted forms: `lat,lng`, `unavailable` or `unavailable: reason`. Blank
/// lines and `#` comments yield `None`.
pub fn parse_sample_line(line_no: usize, line: &str) -> Result<Option<LocationSample>, CliError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let lower = line.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("unavailable") {
        let reason = rest.trim_start_matches(':').trim();
        let reason = if reason.is_empty() { "unavailable" } else { reason };
        return Ok(Some(LocationSample::unavailable(reason)));
    }

    let invalid = |message: String| CliError::Input {
        line: line_no,
        message,
    };

    let (lat, lng) = line
        .split_once(',')
        .ok_or_else(|| invalid(format!("expected 'lat,lng' or 'unavailable', got '{}'", line)))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid latitude '{}'", lat.trim())))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid longitude '{}'", lng.trim())))?;

    LocationSample::position(lat, lng)
        .map(Some)
        .map_err(|e| invalid(e.to_string()))
}

/// Seconds before the alert when the countdown starts showing.
pub const COUNTDOWN_WINDOW_SECS: f64 = 60.0;

/// Parse one line of monitor input, skipping malformed lines with a warning.
///
/// Both monitor modes use this so one bad line never ends a session.
pub fn next_sample(line_no: usize, line: &str) -> Option<LocationSample> {
    match parse_sample_line(line_no, line) {
        Ok(sample) => sample,
        Err(e) => {
            tracing::warn!(line = line_no, error = %e, "Skipping malformed input line");
            eprintln!("{} {}", style("Skipping:").yellow(), e);
            None
        }
    }
}

/// Pre-alert countdown text once a counting episode is within the window.
pub fn countdown(session: &DwellSession, threshold_secs: f64) -> Option<String> {
    session
        .remaining_secs(threshold_secs)
        .filter(|remaining| *remaining <= COUNTDOWN_WINDOW_SECS)
        .map(|remaining| format!("alert in {}", format_dwell(remaining.ceil())))
}

/// Zone display name, colored by severity.
pub fn styled_zone(zone: ZoneState) -> StyledObject<&'static str> {
    let name = style(zone.display_name()).bold();
    match zone {
        ZoneState::Safe => name.green(),
        ZoneState::Warning => name.yellow(),
        ZoneState::Danger => name.red(),
    }
}

/// Risk level label, colored by severity.
pub fn styled_risk(risk: RiskLevel) -> StyledObject<String> {
    let label = style(risk.to_string());
    match risk {
        RiskLevel::Low => label.green(),
        RiskLevel::Medium => label.yellow(),
        RiskLevel::High => label.red(),
    }
}
