//! OpenRouteService HTTP adapter.
//!
//! Uses the GeoJSON directions endpoint so the geometry comes back as a
//! coordinate array instead of an encoded polyline.

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::itinerary::{RouteLeg, TravelMode};
use crate::polyline::Polyline;
use crate::traits::RoutingBackend;

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsRouter {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsRouter {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn profile(mode: TravelMode) -> &'static str {
        match mode {
            TravelMode::Driving => "driving-car",
            TravelMode::Walking => "foot-hiking",
        }
    }
}

impl RoutingBackend for OrsRouter {
    fn route(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        mode: TravelMode,
    ) -> Option<RouteLeg> {
        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url,
            Self::profile(mode)
        );

        // ORS expects [lon, lat] pairs.
        let body = json!({
            "coordinates": [
                [origin.1, origin.0],
                [destination.1, destination.0],
            ],
        });

        let response = self
            .client
            .post(url)
            .header("Authorization", &self.config.api_key)
            .json(&body)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OrsResponse>());

        let body = match response {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "OpenRouteService request failed");
                return None;
            }
        };

        let feature = body.features.into_iter().next()?;
        let summary = feature.properties.summary;
        let points = feature
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| (lat, lon))
            .collect();

        Some(RouteLeg {
            distance_km: summary.distance / 1000.0,
            duration_hours: summary.duration / 3600.0,
            polyline: Polyline::new(points),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OrsResponse {
    #[serde(default)]
    features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
struct OrsFeature {
    properties: OrsProperties,
    geometry: OrsGeometry,
}

#[derive(Debug, Deserialize)]
struct OrsProperties {
    summary: OrsSummary,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OrsGeometry {
    coordinates: Vec<[f64; 2]>,
}
