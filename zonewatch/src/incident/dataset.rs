//! Incident dataset sources.
//!
//! Ingestion itself is outside the engine; a source only has to yield a
//! complete list of validated [`IncidentRecord`]s.

use std::path::{Path, PathBuf};

use crate::geo::Coordinate;
use crate::zone::ZoneState;

use super::model::IncidentRecordDto;
use super::{DatasetError, IncidentMetadata, IncidentRecord};

/// A loader yielding a complete incident dataset.
pub trait IncidentSource: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Load every record.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the data cannot be read or a record is invalid.
    fn load(&self) -> Result<Vec<IncidentRecord>, DatasetError>;
}

/// Reads a JSON array of records in the incident feed wire format.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dataset file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse records from an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Parse`] for malformed JSON and
    /// [`DatasetError::InvalidLocation`] for out-of-range coordinates.
    pub fn parse(json: &str) -> Result<Vec<IncidentRecord>, DatasetError> {
        let dtos: Vec<IncidentRecordDto> = serde_json::from_str(json)?;
        dtos.into_iter().map(IncidentRecord::try_from).collect()
    }
}

impl IncidentSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn load(&self) -> Result<Vec<IncidentRecord>, DatasetError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| DatasetError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = Self::parse(&json)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "Parsed dataset file");
        Ok(records)
    }
}

/// Built-in demonstration dataset of district-level figures for Indian cities.
///
/// Used when no dataset file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDataset;

/// (state, district, lat, lng, cases, crime rate, severity, zone)
type SampleRow = (&'static str, &'static str, f64, f64, u64, f64, u8, ZoneState);

const SAMPLE_ROWS: &[SampleRow] = &[
    ("Delhi", "New Delhi", 28.6139, 77.209, 1200, 85.7, 5, ZoneState::Danger),
    ("Delhi", "South Delhi", 28.5355, 77.249, 45, 1.7, 5, ZoneState::Danger),
    ("Delhi", "North Delhi", 28.7041, 77.1025, 890, 98.9, 4, ZoneState::Danger),
    ("Maharashtra", "Mumbai City", 19.076, 72.8777, 800, 6.5, 4, ZoneState::Warning),
    ("Maharashtra", "Mumbai Suburban", 19.1136, 72.8697, 456, 4.9, 2, ZoneState::Safe),
    ("Karnataka", "Bengaluru Urban", 12.9716, 77.5946, 456, 5.4, 3, ZoneState::Safe),
    ("Tamil Nadu", "Chennai", 13.0827, 80.2707, 234, 5.0, 3, ZoneState::Safe),
    ("West Bengal", "Kolkata", 22.5726, 88.3639, 345, 7.7, 3, ZoneState::Warning),
    ("Telangana", "Hyderabad", 17.385, 78.4867, 234, 3.4, 2, ZoneState::Safe),
    ("Rajasthan", "Jaipur", 26.9124, 75.7873, 456, 14.7, 4, ZoneState::Warning),
    ("Uttar Pradesh", "Lucknow", 26.8467, 80.9462, 567, 20.3, 4, ZoneState::Danger),
];

impl IncidentSource for SampleDataset {
    fn name(&self) -> &str {
        "sample"
    }

    fn load(&self) -> Result<Vec<IncidentRecord>, DatasetError> {
        SAMPLE_ROWS
            .iter()
            .zip(1u64..)
            .map(|(row, id)| sample_record(id, row))
            .collect()
    }
}

fn sample_record(id: u64, row: &SampleRow) -> Result<IncidentRecord, DatasetError> {
    let &(state, district, lat, lng, cases, rate, severity, zone) = row;
    let location =
        Coordinate::new(lat, lng).map_err(|source| DatasetError::InvalidLocation { id, source })?;
    let metadata = IncidentMetadata {
        state: Some(state.to_string()),
        district: Some(district.to_string()),
        cases_reported: Some(cases),
        crime_rate: Some(rate),
        ..IncidentMetadata::default()
    };
    Ok(IncidentRecord::new(id, location, severity, zone).with_metadata(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_dataset_loads() {
        let records = SampleDataset.load().unwrap();
        assert_eq!(records.len(), SAMPLE_ROWS.len());
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].place_name(), "New Delhi, Delhi");
        assert_eq!(
            records.iter().filter(|r| r.zone == ZoneState::Danger).count(),
            4
        );
    }

    #[test]
    fn test_parse_json_array() {
        let json = r#"[
            {"id": 1, "latitude": 28.6139, "longitude": 77.209,
             "severityScore": 5, "zoneType": "danger", "district": "New Delhi"},
            {"id": 2, "latitude": 12.9716, "longitude": 77.5946,
             "severityScore": 2, "zoneType": "safe"}
        ]"#;
        let records = JsonFileSource::parse(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].zone, ZoneState::Danger);
        assert_eq!(records[0].metadata.district.as_deref(), Some("New Delhi"));
    }

    #[test]
    fn test_parse_unknown_zone_fails() {
        let json = r#"[{"id": 1, "latitude": 0.0, "longitude": 0.0,
                        "severityScore": 5, "zoneType": "extreme"}]"#;
        assert!(matches!(
            JsonFileSource::parse(json),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_invalid_location_fails() {
        let json = r#"[{"id": 4, "latitude": 0.0, "longitude": 200.0,
                        "severityScore": 1, "zoneType": "safe"}]"#;
        assert!(matches!(
            JsonFileSource::parse(json),
            Err(DatasetError::InvalidLocation { id: 4, .. })
        ));
    }

    #[test]
    fn test_json_file_source_roundtrip() {
        let records = SampleDataset.load().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let source = JsonFileSource::new(file.path());
        let loaded = source.load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/zonewatch/incidents.json");
        assert!(matches!(source.load(), Err(DatasetError::Io { .. })));
    }
}
