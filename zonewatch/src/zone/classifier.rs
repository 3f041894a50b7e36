//! Tiered worst-wins zone classifier.

use crate::geo::Coordinate;
use crate::incident::{DatasetSnapshot, IncidentIndex};

use super::{AreaStatistics, ZoneState};

/// Default radius for zone classification (km).
pub const DEFAULT_NEAR_RADIUS_KM: f64 = 10.0;

/// Default radius for area statistics (km).
pub const DEFAULT_MEDIUM_RADIUS_KM: f64 = 20.0;

/// Radius thresholds for classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Records within this distance decide the zone.
    pub near_radius_km: f64,
    /// Records within this distance feed [`AreaStatistics`].
    ///
    /// Does not influence the zone returned by [`ZoneClassifier::classify`].
    pub medium_radius_km: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            near_radius_km: DEFAULT_NEAR_RADIUS_KM,
            medium_radius_km: DEFAULT_MEDIUM_RADIUS_KM,
        }
    }
}

impl ClassifierConfig {
    /// Set the near radius.
    pub fn with_near_radius_km(mut self, km: f64) -> Self {
        self.near_radius_km = km;
        self
    }

    /// Set the medium radius.
    pub fn with_medium_radius_km(mut self, km: f64) -> Self {
        self.medium_radius_km = km;
        self
    }
}

/// Classifies locations into risk zones.
///
/// Stateless apart from its radius configuration; safe to share between
/// monitoring sessions.
#[derive(Debug, Clone, Default)]
pub struct ZoneClassifier {
    config: ClassifierConfig,
}

impl ZoneClassifier {
    /// Create a classifier with the given radii.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Create a classifier with default radii.
    pub fn with_defaults() -> Self {
        Self::new(ClassifierConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a location against one dataset snapshot.
    ///
    /// Never fails: an empty snapshot or an empty neighbourhood yields
    /// [`ZoneState::Safe`].
    pub fn classify(&self, location: Coordinate, snapshot: &DatasetSnapshot) -> ZoneState {
        if snapshot.is_empty() {
            tracing::debug!(%location, "Empty incident dataset, classifying as safe");
            return ZoneState::Safe;
        }

        let nearby = snapshot.query(location, self.config.near_radius_km);
        if nearby.is_empty() {
            tracing::debug!(
                %location,
                radius_km = self.config.near_radius_km,
                "No incidents within near radius"
            );
            return ZoneState::Safe;
        }

        // Worst label wins; stop early once danger is seen
        let mut worst = ZoneState::Safe;
        for record in nearby {
            match record.zone {
                ZoneState::Danger => return ZoneState::Danger,
                ZoneState::Warning => worst = ZoneState::Warning,
                ZoneState::Safe => {}
            }
        }
        worst
    }

    /// Classify against the index's current snapshot.
    ///
    /// The snapshot is read once, so a concurrent reload cannot be observed
    /// half-way through.
    pub fn classify_index(&self, location: Coordinate, index: &IncidentIndex) -> ZoneState {
        self.classify(location, &index.snapshot())
    }

    /// Summarise incidents within the medium radius.
    pub fn area_statistics(
        &self,
        location: Coordinate,
        snapshot: &DatasetSnapshot,
    ) -> AreaStatistics {
        let nearby = snapshot.query(location, self.config.medium_radius_km);
        AreaStatistics::from_records(self.config.medium_radius_km, nearby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::EARTH_RADIUS_KM;
    use crate::incident::IncidentRecord;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    /// A point `km` kilometres due north of the origin.
    fn north_of_origin(km: f64) -> Coordinate {
        let degrees = (km / EARTH_RADIUS_KM).to_degrees();
        coord(degrees, 0.0)
    }

    fn snapshot(records: Vec<IncidentRecord>) -> DatasetSnapshot {
        DatasetSnapshot::from_records(records).unwrap()
    }

    fn record(id: u64, location: Coordinate, zone: ZoneState) -> IncidentRecord {
        let severity = match zone {
            ZoneState::Safe => 1,
            ZoneState::Warning => 3,
            ZoneState::Danger => 5,
        };
        IncidentRecord::new(id, location, severity, zone)
    }

    #[test]
    fn test_empty_dataset_is_safe() {
        let classifier = ZoneClassifier::with_defaults();
        assert_eq!(
            classifier.classify(coord(0.0, 0.0), &snapshot(vec![])),
            ZoneState::Safe
        );
    }

    #[test]
    fn test_no_records_in_radius_is_safe() {
        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(vec![record(1, north_of_origin(50.0), ZoneState::Danger)]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Safe);
    }

    #[test]
    fn test_danger_at_distance_zero() {
        let classifier = ZoneClassifier::with_defaults();
        let here = coord(28.6139, 77.209);
        let data = snapshot(vec![record(1, here, ZoneState::Danger)]);
        assert_eq!(classifier.classify(here, &data), ZoneState::Danger);
    }

    #[test]
    fn test_worst_wins_not_nearest() {
        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(vec![
            record(1, north_of_origin(5.0), ZoneState::Warning),
            record(2, north_of_origin(9.0), ZoneState::Danger),
        ]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Danger);
    }

    #[test]
    fn test_danger_dominates_safe_and_warning() {
        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(vec![
            record(1, north_of_origin(0.5), ZoneState::Safe),
            record(2, north_of_origin(1.0), ZoneState::Warning),
            record(3, north_of_origin(9.9), ZoneState::Danger),
            record(4, north_of_origin(2.0), ZoneState::Safe),
        ]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Danger);
    }

    #[test]
    fn test_warning_without_danger() {
        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(vec![
            record(1, north_of_origin(3.0), ZoneState::Safe),
            record(2, north_of_origin(8.0), ZoneState::Warning),
            record(3, north_of_origin(15.0), ZoneState::Danger),
        ]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Warning);
    }

    #[test]
    fn test_only_safe_records_is_safe() {
        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(vec![record(1, north_of_origin(1.0), ZoneState::Safe)]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Safe);
    }

    #[test]
    fn test_medium_radius_does_not_affect_zone() {
        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(vec![record(1, north_of_origin(15.0), ZoneState::Danger)]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Safe);

        let stats = classifier.area_statistics(coord(0.0, 0.0), &data);
        assert_eq!(stats.total_records, 1);
    }

    #[test]
    fn test_configurable_near_radius() {
        let classifier =
            ZoneClassifier::new(ClassifierConfig::default().with_near_radius_km(20.0));
        let data = snapshot(vec![record(1, north_of_origin(15.0), ZoneState::Danger)]);
        assert_eq!(classifier.classify(coord(0.0, 0.0), &data), ZoneState::Danger);
    }

    #[test]
    fn test_classify_index_sees_reload() {
        let classifier = ZoneClassifier::with_defaults();
        let index = IncidentIndex::new();
        let here = coord(26.8467, 80.9462);

        assert_eq!(classifier.classify_index(here, &index), ZoneState::Safe);

        index.load(vec![record(1, here, ZoneState::Danger)]).unwrap();
        assert_eq!(classifier.classify_index(here, &index), ZoneState::Danger);

        index.load(vec![record(1, here, ZoneState::Warning)]).unwrap();
        assert_eq!(classifier.classify_index(here, &index), ZoneState::Warning);
    }

    #[test]
    fn test_sample_dataset_new_delhi() {
        use crate::incident::{IncidentSource, SampleDataset};

        let classifier = ZoneClassifier::with_defaults();
        let data = snapshot(SampleDataset.load().unwrap());

        assert_eq!(
            classifier.classify(coord(28.6139, 77.209), &data),
            ZoneState::Danger
        );
        assert_eq!(
            classifier.classify(coord(22.5726, 88.3639), &data),
            ZoneState::Warning
        );
        assert_eq!(
            classifier.classify(coord(12.9716, 77.5946), &data),
            ZoneState::Safe
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn zone_strategy() -> impl Strategy<Value = ZoneState> {
            prop_oneof![
                Just(ZoneState::Safe),
                Just(ZoneState::Warning),
                Just(ZoneState::Danger),
            ]
        }

        proptest! {
            #[test]
            fn test_danger_within_near_radius_always_wins(
                others in prop::collection::vec((0.0..30.0_f64, zone_strategy()), 0..20),
                danger_km in 0.0..9.9_f64,
            ) {
                let classifier = ZoneClassifier::with_defaults();
                let mut records: Vec<IncidentRecord> = others
                    .iter()
                    .enumerate()
                    .map(|(i, (km, zone))| record(i as u64, north_of_origin(*km), *zone))
                    .collect();
                records.push(record(1000, north_of_origin(danger_km), ZoneState::Danger));

                let zone = classifier.classify(coord(0.0, 0.0), &snapshot(records));
                prop_assert_eq!(zone, ZoneState::Danger);
            }

            #[test]
            fn test_zone_is_max_label_within_radius(
                others in prop::collection::vec((0.0..30.0_f64, zone_strategy()), 0..20),
            ) {
                let classifier = ZoneClassifier::with_defaults();
                let expected = others
                    .iter()
                    .filter(|(km, _)| *km < 9.99)
                    .map(|(_, zone)| *zone)
                    .max()
                    .unwrap_or(ZoneState::Safe);
                let records: Vec<IncidentRecord> = others
                    .iter()
                    .enumerate()
                    .filter(|(_, (km, _))| *km < 9.99 || *km > 10.01)
                    .map(|(i, (km, zone))| record(i as u64, north_of_origin(*km), *zone))
                    .collect();

                let zone = classifier.classify(coord(0.0, 0.0), &snapshot(records));
                prop_assert_eq!(zone, expected);
            }
        }
    }
}
