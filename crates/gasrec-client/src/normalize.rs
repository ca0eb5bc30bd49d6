//! Conversion of backend payloads into [`gasrec_core`] domain types.

use gasrec_core::{Coordinates, StationRecord};

use crate::types::{SearchResponse, SearchResults, StationPayload};

const UNNAMED_STATION: &str = "Unknown Station";

/// Convert one station payload.
///
/// Returns `None` when no usable coordinates are present, since the station
/// cannot be placed on the map.
#[must_use]
pub fn normalize_station(payload: StationPayload) -> Option<StationRecord> {
    let nested = payload.location.as_ref();
    let latitude = nested.and_then(|l| l.latitude).or(payload.latitude)?;
    let longitude = nested.and_then(|l| l.longitude).or(payload.longitude)?;
    let coordinates = Coordinates::new(latitude, longitude);
    if !coordinates.is_valid() {
        return None;
    }

    let address = nested
        .and_then(|l| l.address.clone())
        .or(payload.address)
        .filter(|a| !a.trim().is_empty());

    Some(StationRecord {
        name: payload
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_STATION.to_string()),
        coordinates,
        address,
        distance_miles: payload.distance_miles,
        travel_time_minutes: whole_minutes(payload.travel_time_minutes),
        gas_prices: payload.gas_prices,
        price_per_gallon: payload.price_per_gallon,
        travel_cost: payload.travel_cost,
        total_cost: payload.total_cost,
        brand: payload.brand.filter(|b| !b.trim().is_empty()),
        rating: payload.rating,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(minutes: f64) -> u32 {
    if minutes.is_finite() && minutes > 0.0 {
        minutes.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Convert a search response, dropping stations without coordinates.
///
/// Backend order is preserved.
#[must_use]
pub fn normalize_search(response: SearchResponse) -> SearchResults {
    let received = response.stations.len();
    let stations: Vec<StationRecord> = response
        .stations
        .into_iter()
        .filter_map(|p| {
            let name = p.name.clone();
            let record = normalize_station(p);
            if record.is_none() {
                tracing::warn!(station = ?name, "skipping station without usable coordinates");
            }
            record
        })
        .collect();

    if stations.len() < received {
        tracing::debug!(received, kept = stations.len(), "normalized search stations");
    }

    SearchResults {
        stations,
        total_stations: response.total_stations,
        filtered_stations: response.filtered_stations,
        location: response
            .location
            .map(|(lat, lng)| Coordinates::new(lat, lng))
            .filter(Coordinates::is_valid),
        analysis: response.analysis,
    }
}
