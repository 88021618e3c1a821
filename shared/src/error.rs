use thiserror::Error;

/// Failures reported by the platform geolocation API.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("location request timed out")]
    Timeout,
}

/// Failures of a single route lookup. None of these terminate the session;
/// the user retries by reselecting a destination.
#[derive(Debug, Error)]
pub enum RouteFetchError {
    #[error("route request failed: {0}")]
    Transport(String),
    #[error("routing service answered HTTP {0}")]
    Status(u16),
    #[error("could not decode routing response: {0}")]
    Decode(String),
    #[error("routing service returned no routes")]
    NoRoutes,
}
