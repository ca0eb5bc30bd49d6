//! Domain logic for the gasrec fuel-stop planner.
//!
//! Everything here is independent of the backend transport and of how the
//! results are finally drawn: fuel-input validation, recommendation
//! extraction from analysis text, station ranking, and the list/map
//! presentation model.

pub mod app_config;
pub mod config;
pub mod extract;
pub mod format;
pub mod fuel;
pub mod location;
pub mod present;
pub mod rank;
pub mod station;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use extract::{extract_recommendations, MAX_RECOMMENDATIONS};
pub use fuel::{estimate, FuelInputType, FuelRequest};
pub use location::{
    LocationError, LocationRequest, LocationResolver, PositionFix, PositionOptions,
    PositionSource,
};
pub use present::{
    ListView, MapMarker, MapState, MarkerKind, PresentContext, Presentation, ResultPresenter,
    StationCard, Viewport,
};
pub use rank::{names_match, rank, rank_with, DisplayClass, NameMatcher, RankedStation};
pub use station::{Coordinates, SearchLocation, SearchRequest, StationRecord};

/// Errors raised while loading [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
