use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod error;
pub mod format;
pub mod osrm;
pub mod state;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// A catalog entry the user picked, kept alongside its resolved position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub coord: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Path points in travel order, exactly as the routing service returned them.
    pub path: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: f64,
}
