use std::collections::BTreeMap;

use gasrec_core::{AppConfig, Coordinates, Environment, StationRecord};

pub(crate) fn app_config(backend_url: &str) -> AppConfig {
    AppConfig {
        backend_url: backend_url.to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        user_agent: "gasrec-test/0.1".to_string(),
        geolocation_timeout_secs: 10,
        geolocation_max_age_secs: 300,
        max_map_zoom: 15,
        default_fuel_grade: "87".to_string(),
    }
}

pub(crate) fn station(name: &str, latitude: f64, longitude: f64, total_cost: f64) -> StationRecord {
    StationRecord {
        name: name.to_string(),
        coordinates: Coordinates::new(latitude, longitude),
        address: None,
        distance_miles: 1.5,
        travel_time_minutes: 6,
        gas_prices: BTreeMap::new(),
        price_per_gallon: 3.50,
        travel_cost: 0.25,
        total_cost,
        brand: None,
        rating: None,
    }
}
