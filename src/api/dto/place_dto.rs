//! Place-search DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::PlaceSuggestion;

/// Query parameters for `GET /places/search`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PlaceSearchParams {
    /// Free-text place query.
    pub query: String,
}

/// Response body for `GET /places/search`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceSearchResponse {
    /// Autocomplete suggestions in provider order.
    pub data: Vec<PlaceSuggestion>,
}
