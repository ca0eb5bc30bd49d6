//! List and map projections of a ranked result.
//!
//! [`ResultPresenter`] owns the map state for the whole session. Each call
//! to [`ResultPresenter::present`] clears the previous markers before
//! placing new ones, and builds the list cards from the same
//! [`RankedStation`] slice, so the two views can never disagree on order
//! or on which stations are AI picks.

use std::f64::consts::PI;

use serde::Serialize;

use crate::format::{format_currency, format_distance, format_travel_time};
use crate::rank::{DisplayClass, RankedStation};
use crate::station::Coordinates;

/// Only this many leading stations may carry the emphasized marker.
pub const MAX_EMPHASIZED_MARKERS: usize = 5;

/// Default zoom ceiling after fitting the viewport to the markers.
pub const DEFAULT_MAX_ZOOM: u8 = 15;

/// Zoom used when centering on the user alone.
pub const USER_ZOOM: u8 = 13;

pub const NO_STATIONS_MESSAGE: &str =
    "No gas stations found. Try increasing your search radius or check your location settings.";

const MAP_ZOOM_LIMIT: f64 = 21.0;
const TILE_SIZE_PX: f64 = 256.0;
const DEFAULT_VIEWPORT_PX: (u32, u32) = (640, 400);

/// Inputs that shape how prices are shown but not how stations are ordered.
#[derive(Debug, Clone, Copy)]
pub struct PresentContext<'a> {
    pub fuel_grade: &'a str,
    pub fuel_needed: f64,
    /// Shown on the user marker; usually the typed address.
    pub user_label: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerKind {
    User,
    Station {
        /// 1-based position in the ranked list.
        rank: usize,
        /// Larger red marker labeled RECOMMENDED.
        emphasized: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub position: Coordinates,
    /// Price label drawn on the marker, e.g. `$3.45`.
    pub label: Option<String>,
    pub title: String,
    /// Lines for the marker's info popup.
    pub info: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Markers, last known user location, and the current viewport.
#[derive(Debug, Clone)]
pub struct MapState {
    markers: Vec<MapMarker>,
    user_location: Option<Coordinates>,
    viewport: Option<Viewport>,
    size_px: (u32, u32),
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            user_location: None,
            viewport: None,
            size_px: DEFAULT_VIEWPORT_PX,
        }
    }
}

impl MapState {
    #[must_use]
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    #[must_use]
    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn place_user(&mut self, position: Coordinates, label: Option<&str>) {
        let mut info = vec!["Your Location".to_string()];
        if let Some(label) = label {
            info.push(label.to_string());
        }
        self.markers.push(MapMarker {
            kind: MarkerKind::User,
            position,
            label: None,
            title: label.unwrap_or("Your Location").to_string(),
            info,
        });
        self.user_location = Some(position);
        self.viewport = Some(Viewport {
            center: position,
            zoom: USER_ZOOM,
        });
    }

    /// Fit the viewport around every marker, then cap the zoom at `max_zoom`.
    fn fit_to_markers(&mut self, max_zoom: u8) {
        let Some(first) = self.markers.first() else {
            return;
        };
        let (mut south, mut north) = (first.position.latitude, first.position.latitude);
        let (mut west, mut east) = (first.position.longitude, first.position.longitude);
        for m in &self.markers[1..] {
            south = south.min(m.position.latitude);
            north = north.max(m.position.latitude);
            west = west.min(m.position.longitude);
            east = east.max(m.position.longitude);
        }

        let center = Coordinates::new((south + north) / 2.0, (west + east) / 2.0);
        let (width, height) = self.size_px;
        let zoom = fit_zoom(south, north, east - west, width, height).min(max_zoom);
        self.viewport = Some(Viewport { center, zoom });
    }
}

/// Largest zoom at which the bounds fit in a `width` × `height` pixel map
/// (Web Mercator, 256 px tiles).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit_zoom(south: f64, north: f64, lng_span: f64, width: u32, height: u32) -> u8 {
    fn mercator_y(lat: f64) -> f64 {
        let sin = (lat * PI / 180.0).sin();
        let rad_x2 = ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;
        rad_x2.clamp(-PI, PI) / 2.0
    }

    fn zoom_for(px: u32, fraction: f64) -> f64 {
        if fraction <= 0.0 {
            return MAP_ZOOM_LIMIT;
        }
        (f64::from(px) / TILE_SIZE_PX / fraction).log2()
    }

    let lat_fraction = (mercator_y(north) - mercator_y(south)) / PI;
    let lng_fraction = lng_span / 360.0;
    let zoom = zoom_for(height, lat_fraction)
        .min(zoom_for(width, lng_fraction))
        .min(MAP_ZOOM_LIMIT)
        .floor();
    zoom.max(0.0) as u8
}

/// One card in the list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationCard {
    /// 1-based position in the ranked list.
    pub rank: usize,
    pub name: String,
    /// Only the first card carries the RECOMMENDED badge.
    pub recommended_badge: bool,
    pub ai_recommended: bool,
    pub display_class: DisplayClass,
    pub address: Option<String>,
    pub distance_miles: f64,
    pub travel_time_minutes: u32,
    pub brand: Option<String>,
    /// Absent when the station is unrated or rated zero.
    pub rating: Option<f64>,
    pub fuel_grade: String,
    /// Price for the selected grade, or the single fallback price.
    pub price_per_gallon: f64,
    pub fuel_cost: f64,
    pub travel_cost: f64,
    pub total_cost: f64,
    /// 87/89/91 prices, present only when the station reports all three.
    pub grade_prices: Option<[(&'static str, f64); 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    Stations { cards: Vec<StationCard> },
    Empty { message: &'static str },
}

/// What one `present` call produced for the list side, plus the analysis
/// text to show beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub list: ListView,
    pub analysis: Option<String>,
}

/// Owns map state across searches and turns ranked results into views.
#[derive(Debug, Clone)]
pub struct ResultPresenter {
    map: MapState,
    max_zoom: u8,
}

impl Default for ResultPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ZOOM)
    }
}

impl ResultPresenter {
    #[must_use]
    pub fn new(max_zoom: u8) -> Self {
        Self {
            map: MapState::default(),
            max_zoom,
        }
    }

    #[must_use]
    pub fn map(&self) -> &MapState {
        &self.map
    }

    /// Replace both views with `ranked`.
    ///
    /// Prior markers are always cleared first. An empty `ranked` still
    /// updates the map (user marker only) and yields [`ListView::Empty`];
    /// with no user location either, the viewport is cleared too.
    pub fn present(
        &mut self,
        ranked: &[RankedStation],
        user_location: Option<Coordinates>,
        analysis: Option<&str>,
        ctx: &PresentContext<'_>,
    ) -> Presentation {
        self.map.clear_markers();

        if let Some(position) = user_location {
            self.map.place_user(position, ctx.user_label);
        }

        for (idx, r) in ranked.iter().enumerate() {
            self.map.markers.push(station_marker(idx, r, ctx));
        }
        if !ranked.is_empty() {
            self.map.fit_to_markers(self.max_zoom);
        } else if user_location.is_none() {
            self.map.viewport = None;
        }

        tracing::debug!(
            stations = ranked.len(),
            markers = self.map.markers.len(),
            "presented results"
        );

        let list = if ranked.is_empty() {
            ListView::Empty {
                message: NO_STATIONS_MESSAGE,
            }
        } else {
            ListView::Stations {
                cards: ranked
                    .iter()
                    .enumerate()
                    .map(|(idx, r)| station_card(idx, r, ctx))
                    .collect(),
            }
        };

        Presentation {
            list,
            analysis: analysis
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        }
    }

    /// Recenter on the last known user location at [`USER_ZOOM`].
    ///
    /// No-op before any user location is known.
    pub fn reset_view(&mut self) {
        if let Some(center) = self.map.user_location {
            self.map.viewport = Some(Viewport {
                center,
                zoom: USER_ZOOM,
            });
        }
    }
}

fn station_marker(idx: usize, r: &RankedStation, ctx: &PresentContext<'_>) -> MapMarker {
    let s = &r.station;
    let emphasized = idx < MAX_EMPHASIZED_MARKERS && r.ai_recommended;
    let price = format_currency(s.price_for_grade(ctx.fuel_grade));

    let title = if emphasized {
        format!("RECOMMENDED Gas Station ({price})")
    } else {
        format!("Gas Station ({price})")
    };

    let mut info = vec![
        s.name.clone(),
        format!("Price: {price}/gallon"),
        format!("Distance: {}", format_distance(s.distance_miles)),
        format!("Travel Time: {}", format_travel_time(s.travel_time_minutes)),
        format!(
            "Address: {}",
            s.address.as_deref().unwrap_or("Address not available")
        ),
    ];
    if emphasized {
        info.push("RECOMMENDED".to_string());
    }

    MapMarker {
        kind: MarkerKind::Station {
            rank: idx + 1,
            emphasized,
        },
        position: s.coordinates,
        label: Some(price),
        title,
        info,
    }
}

fn station_card(idx: usize, r: &RankedStation, ctx: &PresentContext<'_>) -> StationCard {
    let s = &r.station;
    let price = s.price_for_grade(ctx.fuel_grade);
    let fuel_cost = price * ctx.fuel_needed;

    StationCard {
        rank: idx + 1,
        name: s.name.clone(),
        recommended_badge: idx == 0,
        ai_recommended: r.ai_recommended,
        display_class: r.display_class,
        address: s.address.clone(),
        distance_miles: s.distance_miles,
        travel_time_minutes: s.travel_time_minutes,
        brand: s.brand.clone(),
        rating: s.rating.filter(|r| *r > 0.0),
        fuel_grade: ctx.fuel_grade.to_string(),
        price_per_gallon: price,
        fuel_cost,
        travel_cost: s.travel_cost,
        total_cost: fuel_cost + s.travel_cost,
        grade_prices: s.recognized_grade_prices(),
    }
}

#[cfg(test)]
#[path = "present_test.rs"]
mod tests;
