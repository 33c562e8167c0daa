//! Place search provider: free-text autocomplete and place details.
//!
//! Consumed by the presentation layer to fill in an event's coordinate
//! from a picked place. The gateway proxies the provider so clients never
//! hold the provider API key.

pub mod client;

use async_trait::async_trait;

use crate::domain::{PlaceResult, PlaceSuggestion};
use crate::error::CityscapeError;

pub use client::HttpPlacesClient;

/// Place search over an external provider.
#[async_trait]
pub trait PlaceSearch: std::fmt::Debug + Send + Sync {
    /// Returns autocomplete suggestions for a free-text query.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PlaceLookup`] if the provider call fails.
    async fn search(&self, query: &str) -> Result<Vec<PlaceSuggestion>, CityscapeError>;

    /// Resolves a suggestion into a full place with coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PlaceLookup`] if the provider call fails
    /// or the suggestion identifier is unknown.
    async fn details(&self, suggestion_id: &str) -> Result<PlaceResult, CityscapeError>;
}
