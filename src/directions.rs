//! Directions HTTP adapter.
//!
//! Resolves an origin/destination pair to the route's encoded overview
//! polyline via a Google-Directions-shaped endpoint.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::polyline::{Coordinate, DecodeError, Polyline};

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    /// Travel mode for the route request.
    pub mode: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            mode: "driving".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug)]
pub enum DirectionsError {
    Http(reqwest::Error),
    /// The response carried no routes for the requested pair.
    NoRoute,
    Decode(DecodeError),
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

impl From<DecodeError> for DirectionsError {
    fn from(err: DecodeError) -> Self {
        DirectionsError::Decode(err)
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetches the overview polyline of the best route between two
    /// points, still in its encoded form.
    pub fn overview_polyline(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, DirectionsError> {
        let url = format!(
            "{}/directions/json?origin={:.6},{:.6}&destination={:.6},{:.6}&mode={}&key={}",
            self.config.base_url,
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
            self.config.mode,
            self.config.api_key,
        );

        debug!(
            "requesting directions {:.6},{:.6} -> {:.6},{:.6}",
            origin.latitude, origin.longitude, destination.latitude, destination.longitude
        );

        let response = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        match extract_overview(response) {
            Some(points) => Ok(points),
            None => {
                warn!("directions response carried no routes");
                Err(DirectionsError::NoRoute)
            }
        }
    }

    /// Fetches and decodes the route between two points.
    pub fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Polyline, DirectionsError> {
        let encoded = self.overview_polyline(origin, destination)?;
        Ok(Polyline::from_encoded(&encoded)?)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

fn extract_overview(response: DirectionsResponse) -> Option<String> {
    response
        .routes
        .into_iter()
        .next()
        .map(|route| route.overview_polyline.points)
}
