//! Area statistics around a location.

use serde::Serialize;

use crate::incident::IncidentRecord;

use super::ZoneState;

/// Coarse risk level for the wider neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl From<ZoneState> for RiskLevel {
    fn from(zone: ZoneState) -> Self {
        match zone {
            ZoneState::Safe => RiskLevel::Low,
            ZoneState::Warning => RiskLevel::Medium,
            ZoneState::Danger => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Summary of incident records within a radius.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStatistics {
    /// Radius the summary covers (km).
    pub radius_km: f64,
    /// Number of incident records in range.
    pub total_records: usize,
    /// Records labelled danger.
    pub danger_records: usize,
    /// Records labelled warning.
    pub warning_records: usize,
    /// Records labelled safe.
    pub safe_records: usize,
    /// Sum of reported cases across records that carry a count.
    pub total_cases: u64,
    /// Highest severity in range, if any records.
    pub max_severity: Option<u8>,
    /// Worst label in range, mapped to a risk level.
    pub nearby_risk: RiskLevel,
}

impl AreaStatistics {
    /// Aggregate the given records.
    pub fn from_records<'a, I>(radius_km: f64, records: I) -> Self
    where
        I: IntoIterator<Item = &'a IncidentRecord>,
    {
        let mut stats = Self {
            radius_km,
            ..Self::default()
        };
        let mut worst = ZoneState::Safe;

        for record in records {
            stats.total_records += 1;
            match record.zone {
                ZoneState::Danger => stats.danger_records += 1,
                ZoneState::Warning => stats.warning_records += 1,
                ZoneState::Safe => stats.safe_records += 1,
            }
            stats.total_cases += record.metadata.cases_reported.unwrap_or(0);
            stats.max_severity = stats.max_severity.max(Some(record.severity));
            worst = worst.max(record.zone);
        }

        stats.nearby_risk = RiskLevel::from(worst);
        stats
    }
}
