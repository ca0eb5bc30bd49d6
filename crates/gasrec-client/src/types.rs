//! Backend request and response shapes.
//!
//! Every response body is a JSON object; all but `/api/config` carry a
//! `"success"` flag and, on failure, an `"error"` string. The flag is
//! checked before these types are deserialized, so they only model the
//! success shape.

use std::collections::BTreeMap;

use gasrec_core::{Coordinates, SearchLocation, SearchRequest};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GET /api/config
// ---------------------------------------------------------------------------

/// Server-side defaults and feature availability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendConfig {
    pub default_mpg: f64,
    pub default_tank_size: f64,
    pub default_radius: f64,
    /// Travel-time cutoff the backend filters with, when it reports one.
    #[serde(default)]
    pub max_travel_time: Option<f64>,
    #[serde(default)]
    pub has_google_maps: bool,
    #[serde(default)]
    pub has_claude: bool,
    #[serde(default)]
    pub has_openai: bool,
}

// ---------------------------------------------------------------------------
// POST /api/calculate-fuel
// ---------------------------------------------------------------------------

/// Result of a fuel calculation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FuelEstimate {
    pub fuel_needed: f64,
    #[serde(default)]
    pub tank_remaining: Option<f64>,
}

// ---------------------------------------------------------------------------
// POST /api/search-stations
// ---------------------------------------------------------------------------

/// Flat request body for `/api/search-stations`.
///
/// Coordinates are always sent with `location_type: "current"`; the backend
/// only geocodes when it receives an address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequestBody<'a> {
    pub mpg: f64,
    pub tank_size: f64,
    pub fuel_needed: f64,
    pub fuel_grade: &'a str,
    pub location_type: &'static str,
    pub radius_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl<'a> From<&'a SearchRequest> for SearchRequestBody<'a> {
    fn from(req: &'a SearchRequest) -> Self {
        let (location_type, address, latitude, longitude) = match &req.location {
            SearchLocation::Address(a) => ("address", Some(a.as_str()), None, None),
            SearchLocation::Coordinates(c) => {
                ("current", None, Some(c.latitude), Some(c.longitude))
            }
        };
        Self {
            mpg: req.mpg,
            tank_size: req.tank_size,
            fuel_needed: req.fuel_needed,
            fuel_grade: &req.fuel_grade,
            location_type,
            radius_miles: req.radius_miles,
            address,
            latitude,
            longitude,
        }
    }
}

/// Raw `/api/search-stations` success body.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub stations: Vec<StationPayload>,
    #[serde(default)]
    pub total_stations: usize,
    #[serde(default)]
    pub filtered_stations: usize,
    /// Resolved search center as `[lat, lng]`.
    #[serde(default)]
    pub location: Option<(f64, f64)>,
    #[serde(default)]
    pub analysis: Option<String>,
}

/// One station as the backend sends it.
///
/// Coordinates and address may arrive nested under `location` or flat on
/// the record; the nested form wins when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct StationPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<LocationPayload>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub distance_miles: f64,
    /// Some backends report fractional minutes.
    #[serde(default)]
    pub travel_time_minutes: f64,
    #[serde(default)]
    pub gas_prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub price_per_gallon: f64,
    #[serde(default)]
    pub travel_cost: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationPayload {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Normalized search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub stations: Vec<gasrec_core::StationRecord>,
    /// Stations the backend found before filtering.
    pub total_stations: usize,
    /// Stations that survived the backend's range filter.
    pub filtered_stations: usize,
    pub location: Option<Coordinates>,
    pub analysis: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /api/current-location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CurrentLocationResponse {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(location: SearchLocation) -> SearchRequest {
        SearchRequest {
            mpg: 28.0,
            tank_size: 14.0,
            fuel_needed: 7.0,
            fuel_grade: "89".to_string(),
            radius_miles: 5.0,
            location,
        }
    }

    #[test]
    fn address_request_body_omits_coordinates() {
        let req = request(SearchLocation::Address("1 Market St".to_string()));
        let body = serde_json::to_value(SearchRequestBody::from(&req)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "mpg": 28.0,
                "tank_size": 14.0,
                "fuel_needed": 7.0,
                "fuel_grade": "89",
                "location_type": "address",
                "radius_miles": 5.0,
                "address": "1 Market St"
            })
        );
    }

    #[test]
    fn coordinate_request_body_is_current_type() {
        let req = request(SearchLocation::Coordinates(Coordinates::new(37.5, -122.0)));
        let body = serde_json::to_value(SearchRequestBody::from(&req)).unwrap();
        assert_eq!(body["location_type"], "current");
        assert_eq!(body["latitude"], 37.5);
        assert_eq!(body["longitude"], -122.0);
        assert!(body.get("address").is_none());
    }

    #[test]
    fn config_tolerates_missing_flags() {
        let cfg: BackendConfig = serde_json::from_value(serde_json::json!({
            "default_mpg": 25.0,
            "default_tank_size": 15.0,
            "default_radius": 10.0
        }))
        .unwrap();
        assert!(!cfg.has_google_maps);
        assert!(cfg.max_travel_time.is_none());
    }

    #[test]
    fn search_response_location_is_lat_lng_pair() {
        let resp: SearchResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "location": [37.77, -122.42],
            "stations": []
        }))
        .unwrap();
        assert_eq!(resp.location, Some((37.77, -122.42)));
        assert!(resp.analysis.is_none());
    }
}
