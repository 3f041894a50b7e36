//! Spatial index over incident records.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::geo::{distance_km, BoundingBox, Coordinate};

use super::dataset::IncidentSource;
use super::{DatasetError, IncidentRecord};

/// An immutable, published version of the incident dataset.
///
/// All queries during one classification run against a single snapshot.
#[derive(Debug)]
pub struct DatasetSnapshot {
    records: Vec<IncidentRecord>,
    generation: u64,
    loaded_at: DateTime<Utc>,
}

impl DatasetSnapshot {
    fn new(records: Vec<IncidentRecord>, generation: u64) -> Self {
        Self {
            records,
            generation,
            loaded_at: Utc::now(),
        }
    }

    /// Build a standalone snapshot, bypassing an index.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateId`] if two records share an identifier.
    pub fn from_records(records: Vec<IncidentRecord>) -> Result<Self, DatasetError> {
        check_unique_ids(&records)?;
        Ok(Self::new(records, 0))
    }

    /// All records within `radius_km` of `center` (boundary inclusive).
    ///
    /// Order is unspecified.
    pub fn query(&self, center: Coordinate, radius_km: f64) -> Vec<&IncidentRecord> {
        self.records
            .iter()
            .filter(|record| distance_km(center, record.location) <= radius_km)
            .collect()
    }

    /// All records inside a bounding box.
    pub fn query_bounds(&self, bounds: &BoundingBox) -> Vec<&IncidentRecord> {
        self.records
            .iter()
            .filter(|record| bounds.contains(record.location))
            .collect()
    }

    /// All records in the snapshot.
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic load counter; 0 for the initial empty dataset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When this snapshot was published.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Thread-safe holder of the current dataset snapshot.
///
/// The lock guards only the `Arc` pointer: readers clone the pointer and
/// release the lock immediately, writers swap in a fully built snapshot.
///
/// # Example
///
/// ```
/// use zonewatch::geo::Coordinate;
/// use zonewatch::incident::{IncidentIndex, IncidentRecord};
/// use zonewatch::zone::ZoneState;
///
/// let index = IncidentIndex::new();
/// let here = Coordinate::new(26.8467, 80.9462).unwrap();
/// index.load(vec![IncidentRecord::new(1, here, 4, ZoneState::Danger)]).unwrap();
///
/// assert_eq!(index.query(here, 1.0).len(), 1);
/// ```
#[derive(Debug)]
pub struct IncidentIndex {
    current: RwLock<Arc<DatasetSnapshot>>,
    next_generation: AtomicU64,
}

impl Default for IncidentIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidentIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(DatasetSnapshot::new(Vec::new(), 0))),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Create an index pre-loaded with records.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateId`] if two records share an identifier.
    pub fn with_records(records: Vec<IncidentRecord>) -> Result<Self, DatasetError> {
        let index = Self::new();
        index.load(records)?;
        Ok(index)
    }

    /// Replace the entire dataset atomically.
    ///
    /// The new snapshot is built before the swap; on error the previous
    /// dataset stays published.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateId`] if two records share an identifier.
    pub fn load(&self, records: Vec<IncidentRecord>) -> Result<(), DatasetError> {
        check_unique_ids(&records)?;

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(DatasetSnapshot::new(records, generation));
        let count = snapshot.len();

        *self.current.write() = snapshot;

        if count == 0 {
            tracing::warn!(
                generation,
                "Incident dataset loaded with no records; all locations classify as safe"
            );
        } else {
            tracing::info!(generation, records = count, "Incident dataset loaded");
        }
        Ok(())
    }

    /// Load from a source and publish the result.
    ///
    /// # Errors
    ///
    /// Propagates any error from the source or from [`IncidentIndex::load`].
    pub fn refresh(&self, source: &dyn IncidentSource) -> Result<(), DatasetError> {
        tracing::debug!(source = source.name(), "Refreshing incident dataset");
        let records = source.load()?;
        self.load(records)
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<DatasetSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Records within `radius_km` of `center`, cloned out of the current snapshot.
    pub fn query(&self, center: Coordinate, radius_km: f64) -> Vec<IncidentRecord> {
        self.snapshot()
            .query(center, radius_km)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Records inside `bounds`, cloned out of the current snapshot.
    pub fn query_bounds(&self, bounds: &BoundingBox) -> Vec<IncidentRecord> {
        self.snapshot()
            .query_bounds(bounds)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Whether the current snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}

fn check_unique_ids(records: &[IncidentRecord]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(DatasetError::DuplicateId(record.id));
        }
    }
    Ok(())
}
