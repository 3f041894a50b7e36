//! Risk zone labels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Risk zone assigned to a location.
///
/// Variants are declared in severity order so the derived `Ord` gives
/// `Safe < Warning < Danger`; the classifier relies on this for worst-wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ZoneState {
    /// No warning or danger incidents nearby (or no data at all).
    #[default]
    Safe,
    /// Moderate-risk incidents nearby.
    Warning,
    /// High-risk incidents nearby.
    Danger,
}

impl ZoneState {
    /// All zones in ascending severity.
    pub const ALL: [ZoneState; 3] = [ZoneState::Safe, ZoneState::Warning, ZoneState::Danger];

    /// Label shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            ZoneState::Safe => "Safe Zone",
            ZoneState::Warning => "Caution Zone",
            ZoneState::Danger => "Danger Zone",
        }
    }

    /// Whether this is the danger zone.
    #[inline]
    pub fn is_danger(&self) -> bool {
        matches!(self, ZoneState::Danger)
    }
}

impl std::fmt::Display for ZoneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneState::Safe => write!(f, "safe"),
            ZoneState::Warning => write!(f, "warning"),
            ZoneState::Danger => write!(f, "danger"),
        }
    }
}

/// Error returned when parsing an unknown zone label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown zone label '{0}' (expected safe, warning or danger)")]
pub struct ParseZoneError(pub String);

impl FromStr for ZoneState {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Ok(ZoneState::Safe),
            "warning" => Ok(ZoneState::Warning),
            "danger" => Ok(ZoneState::Danger),
            other => Err(ParseZoneError(other.to_string())),
        }
    }
}
