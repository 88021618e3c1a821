use shared::Coordinate;
use shared::error::LocationError;

/// Awaitable face of the platform geolocation API. Requesting a fix may
/// prompt for permission; a superseded request is cancelled by simply
/// dropping its eventual result.
pub trait LocationProvider {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Fixed coordinate standing in for a live GPS fix.
pub struct FixedLocation(Coordinate);

impl FixedLocation {
    pub fn new(coord: Coordinate) -> Self {
        Self(coord)
    }
}

impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Always reports a denied permission, for exercising the no-location path.
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}
