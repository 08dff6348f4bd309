//! HTTP client for the places nearby-search endpoint.
//!
//! Wraps `reqwest` with API key management, status-envelope checking, and
//! mapping of upstream records into [`Place`]. Exactly one request is sent per
//! search; there is no retry loop.

use std::time::Duration;

use atlunch_core::{AppConfig, NearbyRequest, Place, PlacesService};
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::NearbySearchResponse;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const NEARBY_SEARCH_PATH: &str = "nearbysearch/json";

/// Client for the places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Config`] when the API key is missing, or any
    /// error from [`PlacesClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let api_key = config.require_places_api_key()?;
        Self::with_base_url(
            api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.places_base_url,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs one nearby search and maps the results.
    ///
    /// `ZERO_RESULTS` is a successful empty list. Records that cannot be
    /// mapped (no geometry, closed venue) are skipped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiError`] if the service returns an error status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_nearby(&self, request: &NearbyRequest) -> Result<Vec<Place>, PlacesError> {
        let url = self.build_url(request)?;
        tracing::debug!(
            location = %request.location,
            radius = request.radius_meters,
            category = %request.category,
            "sending nearby search"
        );

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let envelope: NearbySearchResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(location={})", request.location),
                source: e,
            })?;

        Self::check_status(&envelope)?;

        let total = envelope.results.len();
        let places: Vec<Place> = envelope
            .results
            .into_iter()
            .filter_map(|raw| {
                let id = raw.place_id.clone();
                let place = raw.into_place();
                if place.is_none() {
                    tracing::debug!(place_id = %id, "skipping unusable place record");
                }
                place
            })
            .collect();

        tracing::info!(
            received = total,
            kept = places.len(),
            "nearby search completed"
        );
        Ok(places)
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, request: &NearbyRequest) -> Result<Url, PlacesError> {
        let mut url =
            self.base_url
                .join(NEARBY_SEARCH_PATH)
                .map_err(|e| PlacesError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("location", &request.location.to_string());
            pairs.append_pair("radius", &request.radius_meters.to_string());
            pairs.append_pair("type", &request.category);
            pairs.append_pair("business_status", NearbyRequest::STATUS);
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    fn check_status(envelope: &NearbySearchResponse) -> Result<(), PlacesError> {
        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(()),
            other => Err(PlacesError::ApiError {
                status: other.to_string(),
                message: envelope
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string()),
            }),
        }
    }
}

impl PlacesService for PlacesClient {
    type Error = PlacesError;

    async fn nearby_search(&self, request: &NearbyRequest) -> Result<Vec<Place>, Self::Error> {
        self.search_nearby(request).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
