//! Station and search-request data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grade codes that get the compact three-price listing on a station card.
pub const RECOGNIZED_GRADES: [&str; 3] = ["87", "89", "91"];

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// One station from a search response.
///
/// Records are rebuilt on every search and never mutated afterwards. `name`
/// is the only identity the backend gives and is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub distance_miles: f64,
    pub travel_time_minutes: u32,
    /// Grade code (e.g. `"87"`) to price per gallon. May be partial or empty.
    pub gas_prices: BTreeMap<String, f64>,
    /// Undifferentiated price used when the grade table lacks an entry.
    pub price_per_gallon: f64,
    pub travel_cost: f64,
    /// Fuel cost for the requested grade plus travel cost, as computed by
    /// the backend.
    pub total_cost: f64,
    pub brand: Option<String>,
    pub rating: Option<f64>,
}

impl StationRecord {
    /// Price for `grade`, falling back to [`StationRecord::price_per_gallon`].
    ///
    /// Non-positive table entries count as missing.
    #[must_use]
    pub fn price_for_grade(&self, grade: &str) -> f64 {
        self.gas_prices
            .get(grade)
            .copied()
            .filter(|p| *p > 0.0)
            .unwrap_or(self.price_per_gallon)
    }

    /// Prices for 87/89/91 when the table carries all three.
    #[must_use]
    pub fn recognized_grade_prices(&self) -> Option<[(&'static str, f64); 3]> {
        let mut out = [("", 0.0); 3];
        for (slot, grade) in out.iter_mut().zip(RECOGNIZED_GRADES) {
            let price = self.gas_prices.get(grade).copied().filter(|p| *p > 0.0)?;
            *slot = (grade, price);
        }
        Some(out)
    }

    /// Rating used for ordering; a missing rating counts as zero.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Where a search is centered.
///
/// Device positions and explicit coordinates are both sent as coordinates;
/// only typed addresses are geocoded by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchLocation {
    Address(String),
    Coordinates(Coordinates),
}

/// Parameters of one station search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub mpg: f64,
    pub tank_size: f64,
    pub fuel_needed: f64,
    pub fuel_grade: String,
    pub radius_miles: f64,
    pub location: SearchLocation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::station;

    #[test]
    fn price_for_grade_prefers_grade_table() {
        let mut s = station("Shell");
        s.gas_prices.insert("89".to_string(), 3.79);
        assert!((s.price_for_grade("89") - 3.79).abs() < f64::EPSILON);
    }

    #[test]
    fn price_for_grade_falls_back_to_single_price() {
        let mut s = station("Shell");
        s.gas_prices.insert("87".to_string(), 3.49);
        assert!((s.price_for_grade("91") - 3.50).abs() < f64::EPSILON);
    }

    #[test]
    fn recognized_grade_prices_requires_all_three() {
        let mut s = station("Chevron");
        s.gas_prices.insert("87".to_string(), 3.49);
        s.gas_prices.insert("89".to_string(), 3.69);
        assert!(s.recognized_grade_prices().is_none());

        s.gas_prices.insert("91".to_string(), 3.89);
        let prices = s.recognized_grade_prices().expect("all grades present");
        assert_eq!(prices[0].0, "87");
        assert_eq!(prices[2].0, "91");
        assert!((prices[1].1 - 3.69).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinates_validity() {
        assert!(Coordinates::new(37.77, -122.42).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn station_record_serializes_with_nested_coordinates() {
        let json = serde_json::to_value(station("Arco")).unwrap();
        assert_eq!(json["coordinates"]["latitude"], 37.77);
        assert_eq!(json["name"], "Arco");
    }
}
