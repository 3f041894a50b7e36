//! Incident record types.
//!
//! Records are ingested from the wire format used by the incident data feed:
//! a flat camelCase object with `latitude`/`longitude`, a `severityScore` and
//! a `zoneType` label. Only the location, severity and zone label drive
//! classification; everything else is display metadata.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::zone::ZoneState;

use super::DatasetError;

/// A geo-tagged incident record.
///
/// The zone label is expected to agree with the severity (a `danger` record
/// carries the highest severities) but the engine does not enforce this;
/// upstream data owns correctness.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "IncidentRecordDto")]
pub struct IncidentRecord {
    /// Unique identifier within a dataset.
    pub id: u64,
    /// Where the incidents were recorded.
    pub location: Coordinate,
    /// Severity score on an ordered 1-5 scale.
    pub severity: u8,
    /// Zone label this record contributes to.
    pub zone: ZoneState,
    /// Display-only metadata.
    pub metadata: IncidentMetadata,
}

impl IncidentRecord {
    /// Create a record without metadata.
    pub fn new(id: u64, location: Coordinate, severity: u8, zone: ZoneState) -> Self {
        Self {
            id,
            location,
            severity,
            zone,
            metadata: IncidentMetadata::default(),
        }
    }

    /// Attach display metadata.
    pub fn with_metadata(mut self, metadata: IncidentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Human-readable place name, falling back to the coordinate.
    pub fn place_name(&self) -> String {
        match (&self.metadata.district, &self.metadata.state) {
            (Some(district), Some(state)) => format!("{}, {}", district, state),
            (Some(district), None) => district.clone(),
            (None, Some(state)) => state.clone(),
            (None, None) => self.location.to_string(),
        }
    }
}

/// Optional display metadata carried by a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentMetadata {
    /// State or top-level region name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// District name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Year the figures refer to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Crime category heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crime_head: Option<String>,
    /// Number of cases reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases_reported: Option<u64>,
    /// Population of the area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    /// Crime rate per 100k population.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crime_rate: Option<f64>,
}

/// Wire form of a record (unvalidated).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IncidentRecordDto {
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub severity_score: u8,
    pub zone_type: ZoneState,
    #[serde(flatten)]
    pub metadata: IncidentMetadata,
}

impl TryFrom<IncidentRecordDto> for IncidentRecord {
    type Error = DatasetError;

    fn try_from(dto: IncidentRecordDto) -> Result<Self, Self::Error> {
        let location = Coordinate::new(dto.latitude, dto.longitude)
            .map_err(|source| DatasetError::InvalidLocation { id: dto.id, source })?;
        Ok(Self {
            id: dto.id,
            location,
            severity: dto.severity_score,
            zone: dto.zone_type,
            metadata: dto.metadata,
        })
    }
}

impl From<IncidentRecord> for IncidentRecordDto {
    fn from(record: IncidentRecord) -> Self {
        Self {
            id: record.id,
            latitude: record.location.lat(),
            longitude: record.location.lng(),
            severity_score: record.severity,
            zone_type: record.zone,
            metadata: record.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KOLKATA_JSON: &str = r#"{
        "id": 8,
        "state": "West Bengal",
        "district": "Kolkata",
        "year": 2022,
        "crimeHead": "Assault on women",
        "casesReported": 345,
        "latitude": 22.5726,
        "longitude": 88.3639,
        "population": 4500000,
        "crimeRate": 7.7,
        "severityScore": 3,
        "zoneType": "warning"
    }"#;

    #[test]
    fn test_dto_to_record() {
        let dto: IncidentRecordDto = serde_json::from_str(KOLKATA_JSON).unwrap();
        let record = IncidentRecord::try_from(dto).unwrap();

        assert_eq!(record.id, 8);
        assert_eq!(record.zone, ZoneState::Warning);
        assert_eq!(record.severity, 3);
        assert_eq!(record.metadata.cases_reported, Some(345));
        assert_eq!(record.metadata.crime_head.as_deref(), Some("Assault on women"));
        assert_eq!(record.place_name(), "Kolkata, West Bengal");
    }

    #[test]
    fn test_metadata_is_optional() {
        let json = r#"{"id": 1, "latitude": 0.0, "longitude": 0.0,
                       "severityScore": 1, "zoneType": "safe"}"#;
        let dto: IncidentRecordDto = serde_json::from_str(json).unwrap();
        let record = IncidentRecord::try_from(dto).unwrap();
        assert_eq!(record.metadata, IncidentMetadata::default());
        assert_eq!(record.place_name(), "0.0000°N 0.0000°E");
    }

    #[test]
    fn test_invalid_location_rejected() {
        let json = r#"{"id": 5, "latitude": 128.6, "longitude": 77.2,
                       "severityScore": 5, "zoneType": "danger"}"#;
        let dto: IncidentRecordDto = serde_json::from_str(json).unwrap();
        let err = IncidentRecord::try_from(dto).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidLocation { id: 5, .. }));
    }

    #[test]
    fn test_serializes_to_wire_format() {
        let record = IncidentRecord::new(
            2,
            Coordinate::new(28.5355, 77.249).unwrap(),
            5,
            ZoneState::Danger,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["zoneType"], "danger");
        assert_eq!(value["severityScore"], 5);
        assert_eq!(value["latitude"], 28.5355);
        assert!(value.get("district").is_none());
    }
}
