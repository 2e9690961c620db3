//! Distance service
//!
//! Straight-line distance between two coordinates. The registry receives a
//! [`DistanceCalculator`] at construction; trips call it exactly once.

use geo::{GeodesicDistance as _, HaversineDistance as _, Point};
use thiserror::Error;

use crate::models::district::Coordinates;
use crate::utils::validation::validate_coordinates;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistanceError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Maps two coordinate pairs to a distance in kilometers
pub trait DistanceCalculator: Send + Sync {
    fn distance_km(&self, from: Coordinates, to: Coordinates) -> Result<f64, DistanceError>;
}

/// Ellipsoidal distance on WGS-84 (Karney's geodesic)
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicDistance;

impl DistanceCalculator for GeodesicDistance {
    fn distance_km(&self, from: Coordinates, to: Coordinates) -> Result<f64, DistanceError> {
        let meters = to_point(from)?.geodesic_distance(&to_point(to)?);
        Ok(meters / 1000.0)
    }
}

/// Great-circle distance on a sphere of mean Earth radius
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineDistance;

impl DistanceCalculator for HaversineDistance {
    fn distance_km(&self, from: Coordinates, to: Coordinates) -> Result<f64, DistanceError> {
        let meters = to_point(from)?.haversine_distance(&to_point(to)?);
        Ok(meters / 1000.0)
    }
}

/// Validated point, x = longitude and y = latitude
fn to_point(coords: Coordinates) -> Result<Point<f64>, DistanceError> {
    if !coords.latitude.is_finite() || !coords.longitude.is_finite() {
        return Err(DistanceError::InvalidCoordinates(format!(
            "({}, {})",
            coords.latitude, coords.longitude
        )));
    }
    validate_coordinates(coords.latitude, coords.longitude)
        .map_err(|e| DistanceError::InvalidCoordinates(e.message().to_string()))?;
    Ok(Point::new(coords.longitude, coords.latitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::district::lookup;

    fn kampala() -> Coordinates {
        lookup("Kampala").unwrap()
    }

    fn jinja() -> Coordinates {
        lookup("Jinja").unwrap()
    }

    #[test]
    fn test_geodesic_kampala_jinja() {
        let km = GeodesicDistance.distance_km(kampala(), jinja()).unwrap();
        assert!((km - 69.71).abs() < 0.05, "got {}", km);
    }

    #[test]
    fn test_geodesic_longer_route() {
        let kabale = lookup("Kabale").unwrap();
        let km = GeodesicDistance.distance_km(kampala(), kabale).unwrap();
        assert!((km - 338.31).abs() < 0.05, "got {}", km);
    }

    #[test]
    fn test_haversine_close_to_geodesic() {
        let h = HaversineDistance.distance_km(kampala(), jinja()).unwrap();
        let g = GeodesicDistance.distance_km(kampala(), jinja()).unwrap();
        assert!((h - g).abs() < 0.5);
    }

    #[test]
    fn test_near_antipodal_points() {
        let quito = Coordinates::new(-0.1807, -78.4678);
        let opposite = Coordinates::new(0.1807, 101.5322);
        let km = GeodesicDistance.distance_km(quito, opposite).unwrap();
        assert!(km > 19_900.0 && km < 20_010.0, "got {}", km);
    }

    #[test]
    fn test_same_point_is_zero() {
        assert!(GeodesicDistance.distance_km(kampala(), kampala()).unwrap().abs() < 1e-9);
        assert!(HaversineDistance.distance_km(kampala(), kampala()).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let there = GeodesicDistance.distance_km(kampala(), jinja()).unwrap();
        let back = GeodesicDistance.distance_km(jinja(), kampala()).unwrap();
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_coordinates() {
        let bad = Coordinates::new(120.0, 0.0);
        assert!(matches!(
            GeodesicDistance.distance_km(bad, kampala()),
            Err(DistanceError::InvalidCoordinates(_))
        ));
        let nan = Coordinates::new(f64::NAN, 0.0);
        assert!(HaversineDistance.distance_km(kampala(), nan).is_err());
    }
}
