//! Synchronous monitoring pipeline.
//!
//! [`MonitorSession`] does the work of one location update: classify, emit a
//! zone change if the label moved, tick the dwell tracker, emit an alert if it
//! fired. It never sleeps or reads a clock; the caller supplies elapsed time.
//! The async [`SafetyMonitor`](super::SafetyMonitor) drives it from a stream,
//! and replay tooling drives it directly.

use std::sync::Arc;

use chrono::Utc;

use crate::dwell::{DwellSession, DwellTracker, TickOutcome};
use crate::geo::Coordinate;
use crate::incident::IncidentIndex;
use crate::zone::{ZoneClassifier, ZoneState};

use super::{AlertEvent, LocationSample, MonitorConfig, MonitorEvents};

/// Result of feeding one sample or heartbeat into the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Zone after the step, `None` until the first position arrives.
    pub zone: Option<ZoneState>,
    /// Whether a zone change was emitted.
    pub zone_changed: bool,
    /// Dwell tick result, `None` when no tick was taken.
    pub tick: Option<TickOutcome>,
}

/// Classification plus dwell tracking for one subject.
pub struct MonitorSession {
    classifier: ZoneClassifier,
    index: Arc<IncidentIndex>,
    tracker: DwellTracker,
    current_zone: Option<ZoneState>,
    last_location: Option<Coordinate>,
    available: bool,
}

impl MonitorSession {
    /// Create a session over a shared incident index.
    pub fn new(config: MonitorConfig, index: Arc<IncidentIndex>) -> Self {
        Self {
            classifier: ZoneClassifier::new(config.classifier),
            index,
            tracker: DwellTracker::new(config.dwell),
            current_zone: None,
            last_location: None,
            available: false,
        }
    }

    /// Last emitted zone.
    pub fn current_zone(&self) -> Option<ZoneState> {
        self.current_zone
    }

    /// Last known position.
    pub fn last_location(&self) -> Option<Coordinate> {
        self.last_location
    }

    /// Whether the last sample was a position fix.
    pub fn is_location_available(&self) -> bool {
        self.available
    }

    /// Current dwell session.
    pub fn dwell(&self) -> DwellSession {
        self.tracker.session()
    }

    /// Process one stream item.
    ///
    /// A position is classified and ticked with `elapsed_secs`. An
    /// unavailable sample holds the zone and takes no tick, so the caller's
    /// elapsed value is ignored.
    pub fn process_sample(
        &mut self,
        sample: LocationSample,
        elapsed_secs: f64,
        events: &dyn MonitorEvents,
    ) -> StepReport {
        match sample {
            LocationSample::Position(location) => {
                if !self.available && self.last_location.is_some() {
                    tracing::info!(location = %location, "Location available again");
                }
                self.available = true;
                self.last_location = Some(location);

                let zone = self.classifier.classify_index(location, &self.index);
                let zone_changed = self.emit_zone(zone, events);
                let tick = self.tick(location, elapsed_secs, zone, events);
                StepReport {
                    zone: Some(zone),
                    zone_changed,
                    tick: Some(tick),
                }
            }
            LocationSample::Unavailable(reason) => {
                if self.available || self.last_location.is_none() {
                    tracing::warn!(
                        reason = %reason,
                        zone = ?self.current_zone,
                        "Location unavailable, holding last zone"
                    );
                }
                self.available = false;
                StepReport {
                    zone: self.current_zone,
                    zone_changed: false,
                    tick: None,
                }
            }
        }
    }

    /// Reclassify the last position against the current snapshot and tick.
    ///
    /// Does nothing while the location is unavailable or before the first fix.
    pub fn heartbeat(&mut self, elapsed_secs: f64, events: &dyn MonitorEvents) -> StepReport {
        let location = match self.last_location {
            Some(location) if self.available => location,
            _ => {
                return StepReport {
                    zone: self.current_zone,
                    zone_changed: false,
                    tick: None,
                }
            }
        };

        let zone = self.classifier.classify_index(location, &self.index);
        let zone_changed = self.emit_zone(zone, events);
        let tick = self.tick(location, elapsed_secs, zone, events);
        StepReport {
            zone: Some(zone),
            zone_changed,
            tick: Some(tick),
        }
    }

    fn emit_zone(&mut self, zone: ZoneState, events: &dyn MonitorEvents) -> bool {
        if self.current_zone == Some(zone) {
            return false;
        }
        tracing::info!(
            from = ?self.current_zone,
            to = %zone,
            "Zone changed"
        );
        self.current_zone = Some(zone);
        events.on_zone_change(zone);
        true
    }

    fn tick(
        &mut self,
        location: Coordinate,
        elapsed_secs: f64,
        zone: ZoneState,
        events: &dyn MonitorEvents,
    ) -> TickOutcome {
        let outcome = self.tracker.tick(elapsed_secs, zone);
        if outcome.alert_fired {
            let alert = AlertEvent {
                location,
                dwell_secs: outcome.counter_secs,
                triggered_at: Utc::now(),
            };
            tracing::warn!(
                location = %alert.location,
                dwell_secs = alert.dwell_secs,
                "Emergency alert"
            );
            events.on_alert(&alert);
        }
        outcome
    }
}

impl std::fmt::Debug for MonitorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorSession")
            .field("classifier", &self.classifier)
            .field("records", &self.index.len())
            .field("tracker", &self.tracker)
            .field("current_zone", &self.current_zone)
            .field("available", &self.available)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dwell::DwellState;
    use crate::incident::IncidentRecord;
    use crate::monitor::{ChannelEvents, MonitorEvent};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    /// A point `km` north of the origin.
    fn north(km: f64) -> Coordinate {
        Coordinate::new(km / 111.195, 0.0).unwrap()
    }

    /// Danger record at the origin, warning record 30 km north.
    fn index() -> Arc<IncidentIndex> {
        let records = vec![
            IncidentRecord::new(1, origin(), 9, ZoneState::Danger),
            IncidentRecord::new(2, north(30.0), 5, ZoneState::Warning),
        ];
        Arc::new(IncidentIndex::with_records(records).unwrap())
    }

    fn session() -> (MonitorSession, ChannelEvents, UnboundedReceiver<MonitorEvent>) {
        let (events, rx) = ChannelEvents::channel();
        let session = MonitorSession::new(MonitorConfig::default(), index());
        (session, events, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<MonitorEvent>) -> Vec<MonitorEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_first_position_emits_zone() {
        let (mut session, events, mut rx) = session();

        let report = session.process_sample(LocationSample::Position(origin()), 0.0, &events);

        assert_eq!(report.zone, Some(ZoneState::Danger));
        assert!(report.zone_changed);
        assert_eq!(
            drain(&mut rx),
            vec![MonitorEvent::ZoneChanged(ZoneState::Danger)]
        );
    }

    #[test]
    fn test_same_zone_not_re_emitted() {
        let (mut session, events, mut rx) = session();
        session.process_sample(LocationSample::Position(origin()), 0.0, &events);
        let report = session.process_sample(LocationSample::Position(north(1.0)), 1.0, &events);

        assert!(!report.zone_changed);
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[test]
    fn test_zone_change_sequence() {
        let (mut session, events, mut rx) = session();
        session.process_sample(LocationSample::Position(origin()), 0.0, &events);
        session.process_sample(LocationSample::Position(north(28.0)), 1.0, &events);
        session.process_sample(LocationSample::Position(north(60.0)), 1.0, &events);

        assert_eq!(
            drain(&mut rx),
            vec![
                MonitorEvent::ZoneChanged(ZoneState::Danger),
                MonitorEvent::ZoneChanged(ZoneState::Warning),
                MonitorEvent::ZoneChanged(ZoneState::Safe),
            ]
        );
    }

    #[test]
    fn test_alert_after_threshold_via_heartbeats() {
        let (mut session, events, mut rx) = session();
        session.process_sample(LocationSample::Position(origin()), 0.0, &events);

        let fired: usize = (0..400)
            .filter_map(|_| session.heartbeat(1.0, &events).tick)
            .filter(|t| t.alert_fired)
            .count();

        assert_eq!(fired, 1);
        assert_eq!(session.dwell().state(), DwellState::DangerAlerted);
        assert_eq!(session.dwell().counter_secs(), 400.0);

        let alerts: Vec<AlertEvent> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                MonitorEvent::Alert(a) => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].dwell_secs, 300.0);
        assert_eq!(alerts[0].location, origin());
    }

    #[test]
    fn test_unavailable_holds_zone_and_stops_ticking() {
        let (mut session, events, mut rx) = session();
        session.process_sample(LocationSample::Position(origin()), 10.0, &events);

        let report = session.process_sample(LocationSample::unavailable("timeout"), 50.0, &events);
        assert_eq!(report.zone, Some(ZoneState::Danger));
        assert!(report.tick.is_none());
        assert!(!session.is_location_available());

        let report = session.heartbeat(1.0, &events);
        assert!(report.tick.is_none());
        assert_eq!(session.dwell().counter_secs(), 10.0);

        // Recovery continues the same episode
        session.process_sample(LocationSample::Position(origin()), 1.0, &events);
        assert_eq!(session.dwell().counter_secs(), 11.0);
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[test]
    fn test_unavailable_before_first_fix() {
        let (mut session, events, mut rx) = session();
        let report = session.process_sample(LocationSample::unavailable("denied"), 1.0, &events);

        assert_eq!(report.zone, None);
        assert!(session.heartbeat(1.0, &events).tick.is_none());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_empty_index_is_safe() {
        let (events, mut rx) = ChannelEvents::channel();
        let mut session =
            MonitorSession::new(MonitorConfig::default(), Arc::new(IncidentIndex::new()));

        let report = session.process_sample(LocationSample::Position(origin()), 1.0, &events);
        assert_eq!(report.zone, Some(ZoneState::Safe));
        assert_eq!(
            drain(&mut rx),
            vec![MonitorEvent::ZoneChanged(ZoneState::Safe)]
        );
    }

    #[test]
    fn test_reload_applies_to_next_sample() {
        let (events, _rx) = ChannelEvents::channel();
        let index = index();
        let mut session = MonitorSession::new(MonitorConfig::default(), Arc::clone(&index));

        let report = session.process_sample(LocationSample::Position(origin()), 1.0, &events);
        assert_eq!(report.zone, Some(ZoneState::Danger));

        index.load(Vec::new()).unwrap();
        let report = session.process_sample(LocationSample::Position(origin()), 1.0, &events);
        assert_eq!(report.zone, Some(ZoneState::Safe));
        assert!(report.zone_changed);
    }

    #[test]
    fn test_heartbeat_picks_up_reload() {
        let (events, mut rx) = ChannelEvents::channel();
        let index = index();
        let mut session = MonitorSession::new(MonitorConfig::default(), Arc::clone(&index));
        session.process_sample(LocationSample::Position(origin()), 0.0, &events);

        index.load(Vec::new()).unwrap();
        let report = session.heartbeat(1.0, &events);
        assert_eq!(report.zone, Some(ZoneState::Safe));
        assert!(report.zone_changed);

        for _ in 0..400 {
            session.heartbeat(1.0, &events);
        }

        assert_eq!(
            drain(&mut rx),
            vec![
                MonitorEvent::ZoneChanged(ZoneState::Danger),
                MonitorEvent::ZoneChanged(ZoneState::Safe),
            ]
        );
        assert_eq!(session.dwell().state(), DwellState::Safe);
        assert_eq!(session.dwell().counter_secs(), 0.0);
    }
}
