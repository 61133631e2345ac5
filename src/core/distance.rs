use thiserror::Error;

use crate::models::Coordinate;

/// Earth's mean radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A coordinate that cannot take part in a distance computation
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `a` - First point in decimal degrees
/// * `b` - Second point in decimal degrees
///
/// # Returns
/// Great-circle distance in kilometers, or `InvalidCoordinate` if either
/// point has a non-finite or out-of-range component. Never silently returns
/// zero or NaN for bad input.
pub fn distance_km(a: Coordinate, b: Coordinate) -> Result<f64, InvalidCoordinate> {
    for point in [a, b] {
        if !point.is_valid() {
            return Err(InvalidCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }
    }

    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // h must stay within [0, 1]; rounding overshoots it near the antipode
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Ok(EARTH_RADIUS_KM * c)
}

/// Round a distance to two decimals for response payloads
///
/// Internal computation keeps full precision; only the boundary rounds.
#[inline]
pub fn display_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
