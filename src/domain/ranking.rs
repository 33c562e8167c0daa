//! Proximity and text ranking of events.
//!
//! [`rank`] is a pure function: given a slice of events, an optional
//! reference point, and a query string, it returns a new ordered list.
//! The input is never mutated and identical inputs always produce
//! identical output.

use std::cmp::Ordering;

use super::Event;
use super::place::Coordinate;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters (haversine).
#[must_use]
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Orders and filters events for display.
///
/// - Events whose name does not contain `query` as a case-insensitive
///   substring are dropped; an empty query matches everything.
/// - With a reference point, matching events are sorted ascending by
///   great-circle distance. The sort is stable, so ties keep input order.
/// - Events without a real location (the `(0.0, 0.0)` sentinel) have no
///   distance; they sort after all located events, input order preserved.
/// - Without a reference point, input order is kept.
#[must_use]
pub fn rank(events: &[Event], reference: Option<Coordinate>, query: &str) -> Vec<Event> {
    let needle = query.to_lowercase();
    let mut matched: Vec<Event> = events
        .iter()
        .filter(|event| needle.is_empty() || event.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if let Some(origin) = reference {
        matched.sort_by(|a, b| {
            let da = a.coordinate().map(|c| haversine_distance_m(origin, c));
            let db = b.coordinate().map(|c| haversine_distance_m(origin, c));
            match (da, db) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }

    matched
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn event_at(name: &str, latitude: f64, longitude: f64) -> Event {
        Event {
            name: name.to_string(),
            latitude,
            longitude,
            ..Event::draft()
        }
    }

    fn downtown_boston() -> Coordinate {
        Coordinate {
            latitude: 42.3601,
            longitude: -71.0589,
        }
    }

    fn names(ranked: &[Event]) -> Vec<&str> {
        ranked.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn no_reference_empty_query_is_identity() {
        let events = vec![
            event_at("Snowport", 42.3518, -71.0442),
            event_at("Harvard Art Tour", 42.3736, -71.1097),
            event_at("Salem Night Market", 42.5195, -70.8967),
        ];
        let ranked = rank(&events, None, "");
        assert_eq!(
            names(&ranked),
            vec!["Snowport", "Harvard Art Tour", "Salem Night Market"]
        );
    }

    #[test]
    fn sorts_ascending_by_distance() {
        let events = vec![
            event_at("Salem Night Market", 42.5195, -70.8967),
            event_at("Harvard Art Tour", 42.3736, -71.1097),
            event_at("Snowport", 42.3518, -71.0442),
        ];
        let ranked = rank(&events, Some(downtown_boston()), "");
        assert_eq!(
            names(&ranked),
            vec!["Snowport", "Harvard Art Tour", "Salem Night Market"]
        );
    }

    #[test]
    fn unlocated_events_sort_last_in_input_order() {
        let events = vec![
            event_at("Mystery Popup", 0.0, 0.0),
            event_at("Snowport", 42.3518, -71.0442),
            event_at("Unplaced Concert", 0.0, 0.0),
        ];
        let ranked = rank(&events, Some(downtown_boston()), "");
        assert_eq!(
            names(&ranked),
            vec!["Snowport", "Mystery Popup", "Unplaced Concert"]
        );
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let events = vec![event_at("Snowport", 42.3518, -71.0442)];
        for query in ["snow", "SNOW", "Snowport", "port"] {
            let ranked = rank(&events, None, query);
            assert_eq!(ranked.len(), 1, "query {query:?} should match");
        }
        assert!(rank(&events, None, "snowboard").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let events = vec![
            event_at("Snowport", 42.3518, -71.0442),
            event_at("Mystery Popup", 0.0, 0.0),
        ];
        assert_eq!(rank(&events, None, "").len(), 2);
    }

    #[test]
    fn ranking_is_idempotent() {
        let events = vec![
            event_at("Salem Night Market", 42.5195, -70.8967),
            event_at("Snowport", 42.3518, -71.0442),
        ];
        let once = rank(&events, Some(downtown_boston()), "market");
        let twice = rank(&once, Some(downtown_boston()), "market");
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn input_is_not_mutated() {
        let events = vec![
            event_at("Salem Night Market", 42.5195, -70.8967),
            event_at("Snowport", 42.3518, -71.0442),
        ];
        let _ = rank(&events, Some(downtown_boston()), "");
        assert_eq!(names(&events), vec!["Salem Night Market", "Snowport"]);
    }

    #[test]
    fn haversine_known_distance() {
        // Downtown Boston to the Seaport is roughly 1.5 km.
        let seaport = Coordinate {
            latitude: 42.3518,
            longitude: -71.0442,
        };
        let d = haversine_distance_m(downtown_boston(), seaport);
        assert!(d > 1_000.0 && d < 2_500.0, "unexpected distance {d}");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = downtown_boston();
        assert_eq!(haversine_distance_m(p, p), 0.0);
    }
}
