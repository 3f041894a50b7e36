//! Coordinate value types and validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors raised when geographic input is rejected at the boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeoError {
    /// Latitude or longitude outside the WGS-84 range, or not finite.
    #[error("Invalid coordinate ({lat}, {lng}): expected lat in [-90, 90] and lng in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// A WGS-84 position in decimal degrees.
///
/// Values can only be created through [`Coordinate::new`], so every
/// `Coordinate` in the system is known to be in range. Downstream code
/// (classifier, tracker) never re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Unvalidated wire form of a coordinate.
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Create a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCoordinate`] when `lat` is outside
    /// `[-90, 90]`, `lng` is outside `[-180, 180]`, or either is NaN/infinite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        // RangeInclusive::contains is false for NaN, which covers non-finite input
        if !(MIN_LAT..=MAX_LAT).contains(&lat) || !(MIN_LON..=MAX_LON).contains(&lng) {
            return Err(GeoError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lat_hem = if self.lat >= 0.0 { 'N' } else { 'S' };
        let lng_hem = if self.lng >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.lat.abs(),
            lat_hem,
            self.lng.abs(),
            lng_hem
        )
    }
}

/// Geographic bounding box, as requested by a map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern latitude boundary.
    pub north: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Western longitude boundary.
    pub west: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Whether the box contains the coordinate (edges inclusive).
    ///
    /// A box with `west > east` crosses the antimeridian and wraps.
    pub fn contains(&self, coord: Coordinate) -> bool {
        if coord.lat() < self.south || coord.lat() > self.north {
            return false;
        }
        if self.west <= self.east {
            coord.lng() >= self.west && coord.lng() <= self.east
        } else {
            coord.lng() >= self.west || coord.lng() <= self.east
        }
    }
}
