//! Geographic math.
//!
//! Provides the validated [`Coordinate`] value type and the great-circle
//! distance used by every spatial query in the crate.
//!
//! Distances are computed with the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Planar distance on raw degree differences is not
//! offered: a degree of longitude shrinks toward the poles, so radius
//! comparisons in degrees are wrong away from the equator.

mod types;

pub use types::{BoundingBox, Coordinate, GeoError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometres.
///
/// Both coordinates are already validated by construction, so this never
/// fails. The result is always `>= 0`.
///
/// # Example
///
/// ```
/// use zonewatch::geo::{distance_km, Coordinate};
///
/// let delhi = Coordinate::new(28.6139, 77.2090).unwrap();
/// let mumbai = Coordinate::new(19.0760, 72.8777).unwrap();
///
/// let d = distance_km(delhi, mumbai);
/// assert!((d - 1148.0).abs() < 5.0);
/// ```
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h marginally outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Validating variant of [`distance_km`] for raw degree pairs.
///
/// # Errors
///
/// Returns [`GeoError::InvalidCoordinate`] if either pair lies outside
/// `[-90, 90] × [-180, 180]` or is not finite.
pub fn distance_km_checked(a: (f64, f64), b: (f64, f64)) -> Result<f64, GeoError> {
    let a = Coordinate::new(a.0, a.1)?;
    let b = Coordinate::new(b.0, b.1)?;
    Ok(distance_km(a, b))
}
