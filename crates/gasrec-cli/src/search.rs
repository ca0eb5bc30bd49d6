//! `search` command: resolve the location, query the backend, rank, and
//! present.
//!
//! Every failure is reported once on the status line and ends the search
//! without retry. A failed search leaves the presenter untouched.

use std::io::Write;
use std::path::PathBuf;

use gasrec_client::{BackendClient, ClientError};
use gasrec_core::{
    estimate, extract_recommendations, rank, AppConfig, FuelInputType, LocationRequest,
    LocationResolver, PositionSource, PresentContext, ResultPresenter, SearchLocation,
    SearchRequest,
};

use crate::export::write_geojson;
use crate::render::{render_analysis, render_list, render_map};
use crate::status::{StatusKind, StatusReporter};

const FALLBACK_MPG: f64 = 25.0;
const FALLBACK_TANK_SIZE: f64 = 15.0;
const FALLBACK_RADIUS_MILES: f64 = 10.0;

/// How much fuel the driver wants to buy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FuelAmount {
    Gallons(f64),
    /// Percent of the tank, converted by the backend.
    TankPercent(f64),
}

/// Parsed `search` arguments. `None` fields fall back to backend defaults.
#[derive(Debug, Clone)]
pub(crate) struct SearchOptions {
    pub(crate) location: LocationRequest,
    pub(crate) fuel: FuelAmount,
    pub(crate) mpg: Option<f64>,
    pub(crate) tank_size: Option<f64>,
    pub(crate) fuel_grade: Option<String>,
    pub(crate) radius_miles: Option<f64>,
    pub(crate) geojson: Option<PathBuf>,
}

struct Defaults {
    mpg: f64,
    tank_size: f64,
    radius_miles: f64,
}

/// Everything one search run needs, borrowed from `main`.
pub(crate) struct SearchSession<'a, S, W: Write> {
    pub(crate) client: &'a BackendClient,
    pub(crate) resolver: &'a mut LocationResolver<S>,
    pub(crate) presenter: &'a mut ResultPresenter,
    pub(crate) reporter: &'a StatusReporter<W>,
    pub(crate) config: &'a AppConfig,
}

impl<S: PositionSource, W: Write> SearchSession<'_, S, W> {
    /// Run one search and write the results to `out`.
    ///
    /// Returns `Ok(false)` when the search was aborted; the reason is
    /// already on the status line. The loading indicator stays up from
    /// location lookup until the search response arrives.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing results or the GeoJSON file fails.
    pub(crate) async fn run(
        &mut self,
        opts: &SearchOptions,
        out: &mut impl Write,
    ) -> anyhow::Result<bool> {
        let reporter = self.reporter;
        reporter.report(StatusKind::Info, "Processing your request...");
        let loading = reporter.loading();

        let Some(location) = self.resolve_location(&opts.location).await else {
            return Ok(false);
        };

        let defaults = self.defaults(opts).await;
        let tank_size = opts.tank_size.unwrap_or(defaults.tank_size);
        let Some(fuel_needed) = self.fuel_needed(opts.fuel, tank_size).await else {
            return Ok(false);
        };

        let request = SearchRequest {
            mpg: opts.mpg.unwrap_or(defaults.mpg),
            tank_size,
            fuel_needed,
            fuel_grade: opts
                .fuel_grade
                .clone()
                .unwrap_or_else(|| self.config.default_fuel_grade.clone()),
            radius_miles: opts.radius_miles.unwrap_or(defaults.radius_miles),
            location,
        };
        tracing::debug!(?request, "submitting search");

        if matches!(request.location, SearchLocation::Address(_)) {
            self.reporter
                .report(StatusKind::Info, "Geocoding address...");
        }
        let outcome = self.client.search_stations(&request).await;
        drop(loading);

        let results = match outcome {
            Ok(results) => results,
            Err(e) => {
                if !matches!(e, ClientError::Api(_)) {
                    tracing::warn!(error = %e, "station search failed");
                }
                self.reporter
                    .report(StatusKind::Error, format!("Error: {e}"));
                return Ok(false);
            }
        };

        let recommendations = extract_recommendations(results.analysis.as_deref());
        tracing::debug!(?recommendations, "extracted recommendations");
        let ranked = rank(results.stations, &recommendations);

        let (user_location, user_label) = match &request.location {
            SearchLocation::Address(address) => (results.location, Some(address.as_str())),
            SearchLocation::Coordinates(c) => (results.location.or(Some(*c)), None),
        };
        let ctx = PresentContext {
            fuel_grade: &request.fuel_grade,
            fuel_needed: request.fuel_needed,
            user_label,
        };
        let presentation = self.presenter.present(
            &ranked,
            user_location,
            results.analysis.as_deref(),
            &ctx,
        );

        write!(out, "{}", render_list(&presentation.list))?;
        writeln!(out)?;
        write!(out, "{}", render_map(self.presenter.map()))?;
        if let Some(analysis) = &presentation.analysis {
            writeln!(out)?;
            writeln!(out, "AI Recommendation Analysis:")?;
            write!(out, "{}", render_analysis(analysis))?;
        }
        out.flush()?;

        self.reporter.report(
            StatusKind::Success,
            format!("Found {} stations within range", results.filtered_stations),
        );

        if let Some(path) = &opts.geojson {
            write_geojson(self.presenter.map(), path)?;
        }
        Ok(true)
    }

    async fn resolve_location(&mut self, request: &LocationRequest) -> Option<SearchLocation> {
        let current = matches!(request, LocationRequest::CurrentPosition);
        if current {
            self.reporter
                .report(StatusKind::Info, "Getting your current location...");
        }
        match self.resolver.resolve(request.clone()).await {
            Ok(location) => {
                if current {
                    self.reporter
                        .report(StatusKind::Success, "Location acquired successfully!");
                }
                Some(location)
            }
            Err(e) => {
                tracing::warn!(error = %e, "location not resolved; search aborted");
                self.reporter.report(StatusKind::Error, e);
                None
            }
        }
    }

    /// Backend defaults, fetched only when a flag was omitted.
    async fn defaults(&self, opts: &SearchOptions) -> Defaults {
        let fallback = Defaults {
            mpg: FALLBACK_MPG,
            tank_size: FALLBACK_TANK_SIZE,
            radius_miles: FALLBACK_RADIUS_MILES,
        };
        if opts.mpg.is_some() && opts.tank_size.is_some() && opts.radius_miles.is_some() {
            return fallback;
        }

        match self.client.get_config().await {
            Ok(cfg) => {
                self.reporter
                    .report(StatusKind::Success, "Configuration loaded");
                Defaults {
                    mpg: cfg.default_mpg,
                    tank_size: cfg.default_tank_size,
                    radius_miles: cfg.default_radius,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load backend config");
                self.reporter.report(
                    StatusKind::Warning,
                    "Failed to load configuration; using built-in defaults",
                );
                fallback
            }
        }
    }

    async fn fuel_needed(&self, fuel: FuelAmount, tank_size: f64) -> Option<f64> {
        let (input_type, value) = match fuel {
            FuelAmount::Gallons(g) => (FuelInputType::Volume, g),
            FuelAmount::TankPercent(p) => (FuelInputType::Percent, p),
        };
        let Some(request) = estimate(input_type, Some(value), Some(tank_size)) else {
            self.reporter.report(
                StatusKind::Error,
                "Invalid input values. Please check MPG, tank size, and fuel needed.",
            );
            return None;
        };
        if input_type == FuelInputType::Volume {
            return Some(request.value);
        }

        match self.client.calculate_fuel(&request).await {
            Ok(result) => {
                self.reporter.report(
                    StatusKind::Info,
                    format!("Fuel needed: {:.1} gallons", result.fuel_needed),
                );
                Some(result.fuel_needed)
            }
            Err(e) => {
                self.reporter
                    .report(StatusKind::Error, format!("Error: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
