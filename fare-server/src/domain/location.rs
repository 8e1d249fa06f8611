//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::Serialize;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing invalid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A point on the Earth in decimal degrees.
///
/// Latitude is in `[-90, 90]` and longitude in `[-180, 180]`; both are
/// finite. This type guarantees validity by construction.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Coordinates;
///
/// let pune = Coordinates::new(18.5204, 73.8567).unwrap();
/// assert_eq!(pune.lat(), 18.5204);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Create coordinates, validating ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinates {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                reason: "latitude must be between -90 and 90",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinates {
                reason: "longitude must be between -180 and 180",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine_km(self, other)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Haversine distance between two points in kilometers.
///
/// Used as the fallback distance when no routed road distance is known.
pub fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` fractionally past 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let p = point(18.5204, 73.8567);
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn pune_to_mumbai() {
        // Swargate to Mumbai Central, roughly 120 km as the crow flies
        let pune = point(18.5018, 73.8636);
        let mumbai = point(18.9690, 72.8205);
        let d = haversine_km(&pune, &mumbai);
        assert!((115.0..130.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(&point(0.0, 0.0), &point(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodal_points() {
        let d = haversine_km(&point(0.0, 0.0), &point(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::new(-90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinates::new(90.0, -180.0).is_ok());
    }
}
