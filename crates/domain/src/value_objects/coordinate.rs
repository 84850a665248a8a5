//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A WGS84 coordinate with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat")]
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lon")]
    longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without validation (for trusted sources such as
    /// decoded route geometry)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Bit-exact key usable for de-duplicating places at the same position
    ///
    /// `-0.0` and `0.0` map to the same key.
    #[must_use]
    pub fn position_key(&self) -> (u64, u64) {
        fn canonical(value: f64) -> u64 {
            if value == 0.0 { 0.0_f64 } else { value }.to_bits()
        }
        (canonical(self.latitude), canonical(self.longitude))
    }

    /// Approximate distance to another coordinate in meters
    ///
    /// Uses the Haversine formula for great-circle distance
    #[must_use]
    pub fn distance_m(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Well-known campus locations
impl Coordinate {
    /// Garching Forschungszentrum, main campus
    #[must_use]
    pub const fn garching() -> Self {
        Self::new_unchecked(48.265_06, 11.671_09)
    }

    /// Munich city campus (Arcisstraße)
    #[must_use]
    pub const fn stammgelaende() -> Self {
        Self::new_unchecked(48.148_95, 11.567_84)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_key_ignores_zero_sign() {
        let positive = Coordinate::new_unchecked(0.0, 11.67);
        let negative = Coordinate::new_unchecked(-0.0, 11.67);
        assert_eq!(positive.position_key(), negative.position_key());

        let elsewhere = Coordinate::new_unchecked(0.0, 11.68);
        assert_ne!(positive.position_key(), elsewhere.position_key());
    }

    #[test]
    fn test_valid_coordinates() {
        let coord = Coordinate::new(48.26, 11.67).expect("valid coordinates");
        assert!((coord.latitude() - 48.26).abs() < f64::EPSILON);
        assert!((coord.longitude() - 11.67).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_position_key_distinguishes_positions() {
        let a = Coordinate::new_unchecked(48.1, 11.5);
        let b = Coordinate::new_unchecked(48.1, 11.5);
        let c = Coordinate::new_unchecked(48.1, 11.6);
        assert_eq!(a.position_key(), b.position_key());
        assert_ne!(a.position_key(), c.position_key());
    }

    #[test]
    fn test_distance_between_campuses() {
        let distance = Coordinate::garching().distance_m(&Coordinate::stammgelaende());
        // Garching to the city campus is roughly 15km as the crow flies
        assert!((distance - 15_000.0).abs() < 2_000.0);
    }

    #[test]
    fn test_serialization_uses_short_keys() {
        let coord = Coordinate::new(48.26, 11.67).expect("valid");
        let json = serde_json::to_string(&coord).expect("serialize");
        assert_eq!(json, r#"{"lat":48.26,"lon":11.67}"#);

        let deserialized: Coordinate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(coord, deserialized);
    }
}
