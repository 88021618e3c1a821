use std::time::Duration;

use shared::error::RouteFetchError;
use shared::osrm::{OsrmResponse, route_url};
use shared::{Coordinate, RouteResult};

/// Public OSRM demo endpoint, used when no other base URL is configured.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// The only timeout boundary of a lookup.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Driving-route lookup against an OSRM-compatible service.
pub struct RouteFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl RouteFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RouteFetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RouteFetchError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Single attempt, no retry; the user retries by reselecting.
    pub async fn fetch_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteResult, RouteFetchError> {
        let url = route_url(&self.base_url, start, end);
        tracing::debug!("requesting route: {url}");

        let response = self.client.get(&url).send().await.map_err(|err| {
            tracing::warn!("route request failed: {err}");
            RouteFetchError::Transport(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("routing service answered {status}");
            return Err(RouteFetchError::Status(status.as_u16()));
        }

        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|err| RouteFetchError::Decode(err.to_string()))?;
        body.into_route()
    }
}
