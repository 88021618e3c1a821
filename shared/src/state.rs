//! Presentation state of the map widget.
//!
//! All mutations happen on the owning event loop. Route lookups are
//! asynchronous; their completions re-enter through [`TripState::route_resolved`]
//! carrying the generation they were dispatched under, so a response that was
//! superseded by a newer selection is discarded instead of overwriting it.

use crate::catalog;
use crate::error::{LocationError, RouteFetchError};
use crate::format::{format_distance, format_duration};
use crate::{Coordinate, Destination, RouteResult};

/// A route lookup the caller should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub start: Coordinate,
    pub end: Coordinate,
    /// Ties the eventual response back to the selection that requested it.
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct TripState {
    user_location: Option<Coordinate>,
    destination: Option<Destination>,
    route: Option<RouteResult>,
    distance_label: Option<String>,
    duration_label: Option<String>,
    error: Option<String>,
    notice: Option<String>,
    generation: u64,
}

impl TripState {
    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    pub fn distance_label(&self) -> Option<&str> {
        self.distance_label.as_deref()
    }

    pub fn duration_label(&self) -> Option<&str> {
        self.duration_label.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn location_fixed(&mut self, coord: Coordinate) {
        self.user_location = Some(coord);
    }

    pub fn location_failed(&mut self, err: &LocationError) {
        self.error = Some(err.to_string());
    }

    /// Selects a catalog destination and clears any prior route. Returns the
    /// lookup to perform, or `None` when the user location is still unknown
    /// (the destination stays selected and no fetch is issued).
    pub fn select_destination(&mut self, name: &str) -> Option<RouteQuery> {
        self.error = None;
        self.notice = None;

        let Some(coord) = catalog::resolve(name) else {
            self.error = Some(format!("Unknown destination: {name}"));
            return None;
        };

        self.destination = Some(Destination {
            name: name.to_string(),
            coord,
        });
        self.clear_route();
        self.generation += 1;

        let start = self.user_location?;
        Some(RouteQuery {
            start,
            end: coord,
            generation: self.generation,
        })
    }

    /// Applies the outcome of a route lookup. A response whose generation no
    /// longer matches belongs to a superseded selection and is dropped.
    pub fn route_resolved(
        &mut self,
        generation: u64,
        result: Result<RouteResult, RouteFetchError>,
    ) {
        if generation != self.generation {
            return;
        }
        match result {
            Ok(route) => {
                self.distance_label = Some(format_distance(route.distance_m));
                self.duration_label = Some(format_duration(route.duration_s));
                self.route = Some(route);
            }
            Err(err) => {
                self.clear_route();
                self.error = Some(err.to_string());
            }
        }
    }

    /// Drops the selection and route, returning the coordinate the camera
    /// should jump back to. With no known location this is an error notice
    /// and nothing else changes.
    pub fn recenter(&mut self) -> Option<Coordinate> {
        self.notice = None;

        let Some(coord) = self.user_location else {
            self.error = Some("User location is not available.".to_string());
            return None;
        };

        self.error = None;
        self.destination = None;
        self.clear_route();
        // Invalidate any in-flight lookup for the dropped selection.
        self.generation += 1;
        self.notice = Some("Returning to your current location.".to_string());
        Some(coord)
    }

    fn clear_route(&mut self) {
        self.route = None;
        self.distance_label = None;
        self.duration_label = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIX: Coordinate = Coordinate {
        lat: 37.39,
        lon: -122.07,
    };

    fn route(distance_m: f64) -> RouteResult {
        RouteResult {
            path: vec![
                FIX,
                Coordinate {
                    lat: 37.422,
                    lon: -122.084,
                },
            ],
            distance_m,
            duration_s: 312.7,
        }
    }

    #[test]
    fn selecting_before_a_fix_sets_destination_without_query() {
        let mut trip = TripState::default();

        let query = trip.select_destination("Google HQ");

        assert!(query.is_none());
        assert_eq!(trip.destination().map(|d| d.name.as_str()), Some("Google HQ"));
        assert!(trip.error().is_none());
    }

    #[test]
    fn selecting_after_a_fix_yields_a_query() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);

        let query = trip.select_destination("Google HQ").expect("query");

        assert_eq!(query.start, FIX);
        assert_eq!(query.end, catalog::resolve("Google HQ").unwrap());
    }

    #[test]
    fn unknown_destination_is_an_error_notice() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);

        assert!(trip.select_destination("Atlantis").is_none());
        assert!(trip.error().unwrap().contains("Atlantis"));
        assert!(trip.destination().is_none());
    }

    #[test]
    fn successful_lookup_populates_route_and_labels() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);
        let query = trip.select_destination("Google HQ").unwrap();

        trip.route_resolved(query.generation, Ok(route(1500.0)));

        assert_eq!(trip.route().unwrap().path.len(), 2);
        assert_eq!(trip.distance_label(), Some("1.50 km"));
        assert_eq!(trip.duration_label(), Some("5 mins"));
    }

    #[test]
    fn stale_response_never_overwrites_a_newer_selection() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);

        let first = trip.select_destination("Google HQ").unwrap();
        let second = trip.select_destination("Stanford University").unwrap();

        // The first lookup resolves late, after the reselection.
        trip.route_resolved(first.generation, Ok(route(1500.0)));
        assert!(trip.route().is_none());
        assert!(trip.distance_label().is_none());

        trip.route_resolved(second.generation, Ok(route(9200.0)));
        assert_eq!(trip.distance_label(), Some("9.20 km"));
        assert_eq!(
            trip.destination().map(|d| d.name.as_str()),
            Some("Stanford University")
        );
    }

    #[test]
    fn failed_lookup_keeps_destination_and_surfaces_notice() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);
        let query = trip.select_destination("Google HQ").unwrap();

        trip.route_resolved(query.generation, Err(RouteFetchError::NoRoutes));

        assert_eq!(trip.destination().map(|d| d.name.as_str()), Some("Google HQ"));
        assert!(trip.route().is_none());
        assert!(trip.distance_label().is_none());
        assert!(trip.duration_label().is_none());
        assert!(trip.error().unwrap().contains("no routes"));
    }

    #[test]
    fn reselection_clears_prior_route_atomically() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);
        let first = trip.select_destination("Google HQ").unwrap();
        trip.route_resolved(first.generation, Ok(route(1500.0)));

        trip.select_destination("Stanford University").unwrap();

        assert!(trip.route().is_none());
        assert!(trip.distance_label().is_none());
        assert!(trip.duration_label().is_none());
    }

    #[test]
    fn recenter_without_a_fix_errors_and_preserves_state() {
        let mut trip = TripState::default();
        assert!(trip.select_destination("Google HQ").is_none());

        assert!(trip.recenter().is_none());
        assert_eq!(trip.error(), Some("User location is not available."));
        assert_eq!(trip.destination().map(|d| d.name.as_str()), Some("Google HQ"));
    }

    #[test]
    fn recenter_clears_selection_and_returns_the_fix() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);
        let query = trip.select_destination("Google HQ").unwrap();
        trip.route_resolved(query.generation, Ok(route(1500.0)));

        let camera = trip.recenter();

        assert_eq!(camera, Some(FIX));
        assert!(trip.destination().is_none());
        assert!(trip.route().is_none());
        assert!(trip.distance_label().is_none());
        assert_eq!(trip.notice(), Some("Returning to your current location."));
    }

    #[test]
    fn recenter_discards_the_inflight_lookup() {
        let mut trip = TripState::default();
        trip.location_fixed(FIX);
        let query = trip.select_destination("Google HQ").unwrap();

        trip.recenter();
        trip.route_resolved(query.generation, Ok(route(1500.0)));

        assert!(trip.route().is_none());
        assert!(trip.destination().is_none());
    }

    #[test]
    fn location_failure_is_surfaced() {
        let mut trip = TripState::default();

        trip.location_failed(&LocationError::PermissionDenied);

        assert_eq!(trip.error(), Some("location permission denied"));
        assert!(trip.user_location().is_none());
    }
}
