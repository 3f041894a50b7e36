//! Dataset loading errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::geo::GeoError;

/// Errors that can occur while loading an incident dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON or does not match the record schema.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record carries an out-of-range coordinate.
    #[error("Record {id} has an invalid location: {source}")]
    InvalidLocation {
        id: u64,
        #[source]
        source: GeoError,
    },

    /// Two records share the same identifier.
    #[error("Duplicate incident identifier {0}")]
    DuplicateId(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let err = DatasetError::DuplicateId(7);
        assert_eq!(err.to_string(), "Duplicate incident identifier 7");
    }

    #[test]
    fn test_invalid_location_display() {
        let err = DatasetError::InvalidLocation {
            id: 3,
            source: GeoError::InvalidCoordinate {
                lat: 95.0,
                lng: 0.0,
            },
        };
        assert!(err.to_string().starts_with("Record 3 has an invalid location"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = DatasetError::Io {
            path: PathBuf::from("/data/incidents.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/data/incidents.json"));
    }
}
