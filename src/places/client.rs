//! HTTP client for a Places-style autocomplete/details API.
//!
//! Talks to a provider exposing `GET {base}/autocomplete?input=...` and
//! `GET {base}/details?place_id=...`, the response shapes of the Google
//! Places web service. Responses are parsed leniently: entries missing
//! required fields are skipped rather than failing the whole call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::PlaceSearch;
use crate::domain::{PlaceResult, PlaceSuggestion};
use crate::error::CityscapeError;

/// Place search backed by an external HTTP provider.
#[derive(Debug, Clone)]
pub struct HttpPlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpPlacesClient {
    /// Creates a client for the given provider base URL and API key.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::Internal`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, CityscapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CityscapeError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl PlaceSearch for HttpPlacesClient {
    async fn search(&self, query: &str) -> Result<Vec<PlaceSuggestion>, CityscapeError> {
        let base = self.base_url.trim_end_matches('/');
        let url = format!("{base}/autocomplete");
        let body: serde_json::Value = self
            .client
            .get(url)
            .query(&[("input", query), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| CityscapeError::PlaceLookup(e.to_string()))?
            .error_for_status()
            .map_err(|e| CityscapeError::PlaceLookup(e.to_string()))?
            .json()
            .await
            .map_err(|e| CityscapeError::PlaceLookup(e.to_string()))?;

        Ok(parse_suggestions(&body))
    }

    async fn details(&self, suggestion_id: &str) -> Result<PlaceResult, CityscapeError> {
        let base = self.base_url.trim_end_matches('/');
        let url = format!("{base}/details");
        let body: serde_json::Value = self
            .client
            .get(url)
            .query(&[("place_id", suggestion_id), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| CityscapeError::PlaceLookup(e.to_string()))?
            .error_for_status()
            .map_err(|e| CityscapeError::PlaceLookup(e.to_string()))?
            .json()
            .await
            .map_err(|e| CityscapeError::PlaceLookup(e.to_string()))?;

        parse_details(&body).ok_or_else(|| {
            CityscapeError::PlaceLookup(format!("no place details for {suggestion_id}"))
        })
    }
}

/// Extracts suggestions from an autocomplete response body.
fn parse_suggestions(body: &serde_json::Value) -> Vec<PlaceSuggestion> {
    let Some(predictions) = body.get("predictions").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    predictions
        .iter()
        .filter_map(|p| {
            let id = p.get("place_id")?.as_str()?;
            let text = p.get("description")?.as_str()?;
            Some(PlaceSuggestion {
                id: id.to_string(),
                text: text.to_string(),
            })
        })
        .collect()
}

/// Extracts a place result from a details response body.
fn parse_details(body: &serde_json::Value) -> Option<PlaceResult> {
    let result = body.get("result")?;
    let location = result.get("geometry")?.get("location")?;

    Some(PlaceResult {
        id: result.get("place_id")?.as_str()?.to_string(),
        name: result.get("name")?.as_str()?.to_string(),
        address: result
            .get("formatted_address")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        latitude: location.get("lat")?.as_f64()?,
        longitude: location.get("lng")?.as_f64()?,
    })
}
