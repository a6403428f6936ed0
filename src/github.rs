//! GitHub-backed itinerary store.
//!
//! Uses a repository as a simple remote blob store through the contents API:
//! read fetches the base64 payload, write replaces the whole file (update
//! with the current sha when it exists, create on 404).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::itinerary::Itinerary;
use crate::store::{decode_csv, encode_csv, ItineraryStore, StoreError};

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    /// "owner/name" form.
    pub repo: String,
    pub token: String,
    pub branch: String,
    pub timeout_secs: u64,
}

impl GitHubConfig {
    pub fn new(repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            repo: repo.into(),
            token: token.into(),
            branch: "main".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubStore {
    config: GitHubConfig,
    client: reqwest::blocking::Client,
}

impl GitHubStore {
    pub fn new(config: GitHubConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent("roadtrip-planner")
            .build()?;

        Ok(Self { config, client })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.config.api_url, self.config.repo, path
        )
    }

    fn fetch_contents(&self, path: &str) -> Result<Option<ContentsResponse>, StoreError> {
        let response = self
            .client
            .get(self.contents_url(path))
            .bearer_auth(&self.config.token)
            .query(&[("ref", self.config.branch.as_str())])
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        Ok(Some(response.json::<ContentsResponse>()?))
    }
}

impl ItineraryStore for GitHubStore {
    fn load(&self, path: &str) -> Result<Itinerary, StoreError> {
        let contents = self
            .fetch_contents(path)?
            .ok_or_else(|| StoreError::Remote(format!("{path} not found on {}", self.config.branch)))?;

        // The API wraps base64 at 60 columns.
        let raw: String = contents.content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64.decode(raw)?;
        decode_csv(&bytes)
    }

    fn save(&self, itinerary: &Itinerary, path: &str) -> Result<(), StoreError> {
        let bytes = encode_csv(itinerary)?;
        let existing_sha = self.fetch_contents(path)?.map(|contents| contents.sha);

        let mut body = json!({
            "message": format!("Update {path}"),
            "content": BASE64.encode(&bytes),
            "branch": self.config.branch,
        });
        if let Some(sha) = existing_sha {
            body["sha"] = json!(sha);
        }

        let response = self
            .client
            .put(self.contents_url(path))
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().unwrap_or_default();
            return Err(StoreError::Remote(format!("{status}: {message}")));
        }

        info!(path, branch = %self.config.branch, "itinerary pushed to GitHub");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}
