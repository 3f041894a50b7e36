//! Monitor inputs and outputs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::geo::{Coordinate, GeoError};
use crate::zone::ZoneState;

/// One item of the location stream.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSample {
    /// A fresh position fix.
    Position(Coordinate),
    /// The location source could not provide a fix (denied, timed out, ...).
    Unavailable(String),
}

impl LocationSample {
    /// Validate raw degrees into a position sample.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCoordinate`] for out-of-range input, so bad
    /// fixes are rejected before they reach the classifier.
    pub fn position(lat: f64, lng: f64) -> Result<Self, GeoError> {
        Ok(Self::Position(Coordinate::new(lat, lng)?))
    }

    /// An unavailable sample with a reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Emergency alert raised after dwelling in danger beyond the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    /// Last known location of the subject.
    pub location: Coordinate,
    /// Continuous danger dwell when the alert fired.
    pub dwell_secs: f64,
    /// When the alert fired.
    pub triggered_at: DateTime<Utc>,
}

/// Event emitted by the monitor.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The classified zone differs from the previous emission.
    ZoneChanged(ZoneState),
    /// A dwell episode crossed the alert threshold.
    Alert(AlertEvent),
}

/// Receiver of monitor output.
///
/// Called synchronously from the monitoring task; implementations must not block.
pub trait MonitorEvents: Send + Sync {
    /// The zone label changed.
    fn on_zone_change(&self, zone: ZoneState);

    /// An alert fired.
    fn on_alert(&self, alert: &AlertEvent);
}

/// Forwards events into an unbounded channel (fire-and-forget).
#[derive(Debug, Clone)]
pub struct ChannelEvents {
    tx: mpsc::UnboundedSender<MonitorEvent>,
}

impl ChannelEvents {
    /// Create the adapter and the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MonitorEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: MonitorEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Monitor event receiver dropped");
        }
    }
}

impl MonitorEvents for ChannelEvents {
    fn on_zone_change(&self, zone: ZoneState) {
        self.send(MonitorEvent::ZoneChanged(zone));
    }

    fn on_alert(&self, alert: &AlertEvent) {
        self.send(MonitorEvent::Alert(alert.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_validates() {
        assert!(LocationSample::position(28.6, 77.2).is_ok());
        assert!(matches!(
            LocationSample::position(-91.0, 0.0),
            Err(GeoError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_channel_events_forward() {
        let (events, mut rx) = ChannelEvents::channel();
        events.on_zone_change(ZoneState::Warning);

        let alert = AlertEvent {
            location: Coordinate::new(1.0, 2.0).unwrap(),
            dwell_secs: 300.0,
            triggered_at: Utc::now(),
        };
        events.on_alert(&alert);

        assert_eq!(
            rx.try_recv().unwrap(),
            MonitorEvent::ZoneChanged(ZoneState::Warning)
        );
        assert_eq!(rx.try_recv().unwrap(), MonitorEvent::Alert(alert));
    }

    #[test]
    fn test_channel_events_tolerate_dropped_receiver() {
        let (events, rx) = ChannelEvents::channel();
        drop(rx);
        events.on_zone_change(ZoneState::Danger);
    }

    #[test]
    fn test_alert_serializes_camel_case() {
        let alert = AlertEvent {
            location: Coordinate::new(1.0, 2.0).unwrap(),
            dwell_secs: 300.0,
            triggered_at: Utc::now(),
        };
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["dwellSecs"], 300.0);
        assert_eq!(value["location"]["lat"], 1.0);
    }
}
