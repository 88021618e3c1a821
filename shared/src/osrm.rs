//! Wire contract of the OSRM `route` service, reduced to the fields the
//! widget consumes.

use serde::Deserialize;

use crate::error::RouteFetchError;
use crate::{Coordinate, RouteResult};

#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: OsrmGeometry,
    pub distance: f64,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    /// GeoJSON convention: `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Driving-route request with full-overview GeoJSON geometry.
pub fn route_url(base: &str, start: Coordinate, end: Coordinate) -> String {
    format!(
        "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
        base.trim_end_matches('/'),
        start.lon,
        start.lat,
        end.lon,
        end.lat,
    )
}

impl OsrmResponse {
    /// Picks the first route alternative, keeping its points in travel order.
    pub fn into_route(self) -> Result<RouteResult, RouteFetchError> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(RouteFetchError::NoRoutes)?;
        let path = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate { lat, lon })
            .collect();
        Ok(RouteResult {
            path,
            distance_m: route.distance,
            duration_s: route.duration,
        })
    }
}
