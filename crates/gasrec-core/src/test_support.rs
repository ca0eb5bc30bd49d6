use std::collections::BTreeMap;

use crate::station::{Coordinates, StationRecord};

/// A plain station one mile out with a single undifferentiated price.
pub(crate) fn station(name: &str) -> StationRecord {
    StationRecord {
        name: name.to_string(),
        coordinates: Coordinates::new(37.77, -122.42),
        address: None,
        distance_miles: 1.0,
        travel_time_minutes: 4,
        gas_prices: BTreeMap::new(),
        price_per_gallon: 3.50,
        travel_cost: 0.25,
        total_cost: 35.25,
        brand: None,
        rating: None,
    }
}

pub(crate) fn priced(name: &str, total_cost: f64, rating: Option<f64>) -> StationRecord {
    StationRecord {
        total_cost,
        rating,
        ..station(name)
    }
}
