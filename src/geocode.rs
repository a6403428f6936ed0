//! OpenCage forward-geocoding adapter.

use serde::Deserialize;
use tracing::warn;

use crate::traits::GeocodingBackend;

#[derive(Debug, Clone)]
pub struct OpenCageConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl OpenCageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.opencagedata.com".to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    config: OpenCageConfig,
    client: reqwest::blocking::Client,
}

impl OpenCageGeocoder {
    pub fn new(config: OpenCageConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl GeocodingBackend for OpenCageGeocoder {
    fn geocode(&self, address: &str) -> Option<(f64, f64)> {
        let url = format!("{}/geocode/v1/json", self.config.base_url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", address),
                ("key", self.config.api_key.as_str()),
                ("limit", "1"),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OpenCageResponse>());

        match response {
            Ok(body) => body
                .results
                .into_iter()
                .next()
                .map(|result| (result.geometry.lat, result.geometry.lng)),
            Err(err) => {
                warn!(error = %err, address, "geocoding request failed");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    geometry: OpenCageGeometry,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}
