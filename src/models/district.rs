//! District directory
//!
//! Static table of Ugandan districts and their approximate coordinates.
//! Lookups are exact and case-sensitive.

use serde::{Deserialize, Serialize};

use crate::utils::errors::{validation_error, AppResult};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

const DISTRICTS: &[(&str, Coordinates)] = &[
    ("Kampala", Coordinates::new(0.3476, 32.5825)),
    ("Wakiso", Coordinates::new(0.4025, 32.4789)),
    ("Mukono", Coordinates::new(0.3533, 32.7553)),
    ("Jinja", Coordinates::new(0.4244, 33.2041)),
    ("Mbale", Coordinates::new(1.0784, 34.1810)),
    ("Gulu", Coordinates::new(2.7666, 32.3050)),
    ("Arua", Coordinates::new(3.0201, 30.9111)),
    ("Mbarara", Coordinates::new(-0.6072, 30.6545)),
    ("Fort Portal", Coordinates::new(0.6710, 30.2748)),
    ("Hoima", Coordinates::new(1.4350, 31.3524)),
    ("Lira", Coordinates::new(2.2350, 32.9097)),
    ("Masaka", Coordinates::new(-0.3411, 31.7361)),
    ("Kasese", Coordinates::new(0.1833, 30.0833)),
    ("Soroti", Coordinates::new(1.7222, 33.6111)),
    ("Kabale", Coordinates::new(-1.2410, 29.9850)),
];

/// Coordinates of a district, if the name is known
pub fn lookup(name: &str) -> Option<Coordinates> {
    DISTRICTS
        .iter()
        .find(|(district, _)| *district == name)
        .map(|(_, coords)| *coords)
}

/// Like [`lookup`] but fails with a validation error naming the field
pub fn resolve(field: &'static str, name: &str) -> AppResult<Coordinates> {
    lookup(name).ok_or_else(|| {
        validation_error(field, format!("Invalid district name provided: '{}'", name))
    })
}

/// All known district names, sorted
pub fn district_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DISTRICTS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("Kampala"), Some(Coordinates::new(0.3476, 32.5825)));
        assert_eq!(lookup("Fort Portal"), Some(Coordinates::new(0.6710, 30.2748)));
        assert!(lookup("kampala").is_none());
        assert!(lookup("Kampala ").is_none());
        assert!(lookup("Nairobi").is_none());
    }

    #[test]
    fn test_resolve_names_field() {
        let err = resolve("pickup_district", "Atlantis").unwrap_err();
        assert_eq!(err.field(), Some("pickup_district"));
    }

    #[test]
    fn test_district_names_sorted() {
        let names = district_names();
        assert_eq!(names.len(), 15);
        assert_eq!(names.first(), Some(&"Arua"));
        assert_eq!(names.last(), Some(&"Wakiso"));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
