//! HTTP client for the recommendation backend.
//!
//! Wraps `reqwest` with the backend's `{"success": ...}` envelope handling
//! and typed response deserialization. Requests are sent once; failures are
//! returned to the caller without retry.

use std::time::Duration;

use gasrec_core::{Coordinates, FuelRequest, SearchRequest};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::normalize::normalize_search;
use crate::types::{
    BackendConfig, CurrentLocationResponse, FuelEstimate, SearchRequestBody, SearchResponse,
    SearchResults,
};

const DEFAULT_USER_AGENT: &str = "gasrec/0.1 (fuel-planner)";

/// Client for the recommendation backend.
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `Url::join` append to the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client with the default user agent (for tests against a
    /// mock server).
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::new(base_url, timeout_secs, DEFAULT_USER_AGENT)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches server defaults and feature flags from `GET /api/config`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body does not match
    ///   [`BackendConfig`].
    pub async fn get_config(&self) -> Result<BackendConfig, ClientError> {
        let url = self.endpoint("api/config")?;
        let body = self.get_json(&url).await?;
        Self::check_api_error(&body)?;
        Self::decode(body, "config")
    }

    /// Posts a fuel calculation to `POST /api/calculate-fuel`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the backend answers `"success": false`.
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body does not match
    ///   [`FuelEstimate`].
    pub async fn calculate_fuel(&self, request: &FuelRequest) -> Result<FuelEstimate, ClientError> {
        let url = self.endpoint("api/calculate-fuel")?;
        let body = self.post_json(&url, request).await?;
        Self::check_api_error(&body)?;
        Self::decode(
            body,
            &format!("calculate-fuel(input_type={})", request.input_type),
        )
    }

    /// Runs a station search via `POST /api/search-stations`.
    ///
    /// Stations keep the backend's order. Records without usable
    /// coordinates are dropped with a warning.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the backend answers `"success": false`;
    ///   the message is the backend's `error` text verbatim.
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_stations(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResults, ClientError> {
        let url = self.endpoint("api/search-stations")?;
        let body = self
            .post_json(&url, &SearchRequestBody::from(request))
            .await?;
        Self::check_api_error(&body)?;
        let response: SearchResponse = Self::decode(body, "search-stations")?;

        tracing::info!(
            total = response.total_stations,
            filtered = response.filtered_stations,
            returned = response.stations.len(),
            "station search completed"
        );
        Ok(normalize_search(response))
    }

    /// Asks the backend for an approximate position via
    /// `GET /api/current-location` (IP-based lookup).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the backend answers `"success": false`.
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if latitude/longitude are missing.
    pub async fn current_location(&self) -> Result<Coordinates, ClientError> {
        let url = self.endpoint("api/current-location")?;
        let body = self.get_json(&url).await?;
        Self::check_api_error(&body)?;
        let loc: CurrentLocationResponse = Self::decode(body, "current-location")?;
        Ok(Coordinates::new(loc.latitude, loc.longitude))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::read_json(url, response).await
    }

    /// Sends `payload` as a JSON POST, asserts a 2xx status, and parses the
    /// body as JSON.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        payload: &B,
    ) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(%url, "POST");
        let response = self.client.post(url.clone()).json(payload).send().await?;
        Self::read_json(url, response).await
    }

    async fn read_json(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ClientError> {
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Returns [`ClientError::Api`] when the envelope says `"success": false`.
    ///
    /// Bodies without a `success` field pass.
    fn check_api_error(body: &serde_json::Value) -> Result<(), ClientError> {
        if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let msg = body
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ClientError::Api(msg));
        }
        Ok(())
    }

    fn decode<T: DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, ClientError> {
        serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
