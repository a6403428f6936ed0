//! OSRM HTTP adapter for point-to-point routes.

use serde::Deserialize;
use tracing::warn;

use crate::itinerary::{RouteLeg, TravelMode};
use crate::polyline::Polyline;
use crate::traits::RoutingBackend;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmRouter {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmRouter {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn profile(mode: TravelMode) -> &'static str {
        match mode {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        }
    }
}

impl RoutingBackend for OsrmRouter {
    fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Option<RouteLeg> {
        // OSRM takes lon,lat pairs.
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url,
            Self::profile(mode),
            origin.1,
            origin.0,
            destination.1,
            destination.0,
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        let body = match response {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "OSRM request failed");
                return None;
            }
        };

        let route = body.routes.into_iter().next()?;
        let points = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| (lat, lon))
            .collect();

        Some(RouteLeg {
            distance_km: route.distance / 1000.0,
            duration_hours: route.duration / 3600.0,
            polyline: Polyline::new(points),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
