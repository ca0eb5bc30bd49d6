//! Turning the driver's chosen location mode into search-request fields.
//!
//! Typed addresses and explicit coordinates pass straight through. The
//! current-position mode suspends on a [`PositionSource`] and is the only
//! mode that can fail after input validation.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::station::{Coordinates, SearchLocation};

/// Errors from resolving a location. Display strings are user-facing.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Please enter an address.")]
    EmptyAddress,

    #[error("Coordinates ({latitude}, {longitude}) are out of range.")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Location permission was denied. Please use address instead.")]
    PermissionDenied,

    #[error("Timed out after {0:?} waiting for your location. Please use address instead.")]
    Timeout(Duration),

    #[error("Could not get your location ({0}). Please use address instead.")]
    Unavailable(String),
}

/// How a position should be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix younger than this is reused instead of asking again.
    pub max_cached_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_cached_age: Duration::from_secs(5 * 60),
        }
    }
}

/// A position reading and when it was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,
}

/// Something that can report the device's current position.
pub trait PositionSource {
    /// Ask for a fix. Implementations should not retry; the resolver
    /// enforces [`PositionOptions::timeout`].
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<PositionFix, LocationError>>;
}

/// The location mode the driver picked, with its raw input.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationRequest {
    Address(String),
    CurrentPosition,
    Coordinates(Coordinates),
}

/// Resolves [`LocationRequest`]s into [`SearchLocation`]s, caching the
/// last device fix.
pub struct LocationResolver<S> {
    source: S,
    options: PositionOptions,
    last_fix: Option<PositionFix>,
}

impl<S: PositionSource> LocationResolver<S> {
    pub fn new(source: S, options: PositionOptions) -> Self {
        Self {
            source,
            options,
            last_fix: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn last_fix(&self) -> Option<&PositionFix> {
        self.last_fix.as_ref()
    }

    /// Resolve `request` into search-request location fields.
    ///
    /// # Errors
    ///
    /// - [`LocationError::EmptyAddress`] for a blank address.
    /// - [`LocationError::InvalidCoordinates`] for out-of-range coordinates.
    /// - [`LocationError::Timeout`] when the position source does not answer
    ///   within the configured timeout.
    /// - Whatever the position source reports when it fails.
    pub async fn resolve(
        &mut self,
        request: LocationRequest,
    ) -> Result<SearchLocation, LocationError> {
        match request {
            LocationRequest::Address(address) => {
                let trimmed = address.trim();
                if trimmed.is_empty() {
                    return Err(LocationError::EmptyAddress);
                }
                Ok(SearchLocation::Address(trimmed.to_string()))
            }
            LocationRequest::Coordinates(coords) => {
                if coords.is_valid() {
                    Ok(SearchLocation::Coordinates(coords))
                } else {
                    Err(LocationError::InvalidCoordinates {
                        latitude: coords.latitude,
                        longitude: coords.longitude,
                    })
                }
            }
            LocationRequest::CurrentPosition => {
                let fix = self.current_fix(Utc::now()).await?;
                Ok(SearchLocation::Coordinates(fix.coordinates))
            }
        }
    }

    async fn current_fix(&mut self, now: DateTime<Utc>) -> Result<PositionFix, LocationError> {
        if let Some(fix) = self.last_fix.filter(|f| self.is_fresh(f, now)) {
            tracing::debug!(
                age_secs = (now - fix.timestamp).num_seconds(),
                "reusing cached position"
            );
            return Ok(fix);
        }

        let fix = tokio::time::timeout(
            self.options.timeout,
            self.source.current_position(&self.options),
        )
        .await
        .map_err(|_| LocationError::Timeout(self.options.timeout))??;

        if !fix.coordinates.is_valid() {
            return Err(LocationError::Unavailable(format!(
                "position source returned {}",
                fix.coordinates
            )));
        }

        self.last_fix = Some(fix);
        Ok(fix)
    }

    fn is_fresh(&self, fix: &PositionFix, now: DateTime<Utc>) -> bool {
        let max_age = TimeDelta::from_std(self.options.max_cached_age).unwrap_or(TimeDelta::MAX);
        now - fix.timestamp <= max_age
    }
}
