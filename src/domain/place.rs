//! Geographic value types and place-search results.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A WGS-84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

/// A single autocomplete suggestion from the place search provider.
///
/// Ephemeral: consumed by the client to pick a place, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceSuggestion {
    /// Provider-scoped suggestion identifier, usable with the details call.
    pub id: String,
    /// Display text for the suggestion.
    pub text: String,
}

/// A resolved place with name, address, and coordinate.
///
/// Produced by the place search provider's details call and consumed
/// immediately to populate an event's coordinate fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceResult {
    /// Provider-scoped place identifier.
    pub id: String,
    /// Place name.
    pub name: String,
    /// Formatted address.
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl PlaceResult {
    /// Returns the place coordinate.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn place_result_exposes_coordinate() {
        let place = PlaceResult {
            id: "abc".to_string(),
            name: "Snowport".to_string(),
            address: "100 Seaport Blvd, Boston, MA".to_string(),
            latitude: 42.3518,
            longitude: -71.0442,
        };
        let coord = place.coordinate();
        assert_eq!(coord.latitude, 42.3518);
        assert_eq!(coord.longitude, -71.0442);
    }
}
