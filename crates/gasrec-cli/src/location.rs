//! Device position via the backend's IP lookup.

use chrono::Utc;
use gasrec_client::{BackendClient, ClientError};
use gasrec_core::{LocationError, PositionFix, PositionOptions, PositionSource};

/// [`PositionSource`] backed by `GET /api/current-location`.
///
/// IP geolocation has no accuracy knob, so `high_accuracy` is ignored.
pub(crate) struct BackendPositionSource<'a> {
    client: &'a BackendClient,
}

impl<'a> BackendPositionSource<'a> {
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        Self { client }
    }
}

impl PositionSource for BackendPositionSource<'_> {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<PositionFix, LocationError> {
        let coordinates = self
            .client
            .current_location()
            .await
            .map_err(|e: ClientError| {
                tracing::warn!(error = %e, "current-location lookup failed");
                LocationError::Unavailable(e.to_string())
            })?;
        Ok(PositionFix {
            coordinates,
            timestamp: Utc::now(),
        })
    }
}
