//! # KEDB Client
//!
//! HTTP client for the KEDB API, implementing the [`DraftApi`] seam from
//! `kedb-core` over JSON/HTTP. All transport failures, non-2xx statuses
//! and unrecognised response bodies collapse into the uniform
//! [`ApiFailure`] signal; the session never sees status codes.

use async_trait::async_trait;
use serde_json::json;

use kedb_core::{ApiFailure, DraftApi, SuggestedEntry};
use kedb_types::IncidentDescription;

mod response;

pub use response::{parse_generated, parse_suggestions};

/// Default API base URL, matching the mock service's default bind address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001/api";

/// Number of suggestions requested per fetch.
const SUGGESTION_LIMIT: usize = 10;

/// JSON/HTTP client for the KEDB API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from `KEDB_API_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("KEDB_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a JSON body and returns the JSON response body.
    ///
    /// Non-2xx statuses are surfaced as `ApiFailure` without any
    /// status-specific handling.
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ApiFailure> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiFailure(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure(format!("HTTP error! status: {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ApiFailure(format!("invalid JSON from {path}: {e}")))
    }

    /// GETs a path and returns the JSON response body.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiFailure> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiFailure(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure(format!("HTTP error! status: {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ApiFailure(format!("invalid JSON from {path}: {e}")))
    }
}

#[async_trait]
impl DraftApi for ApiClient {
    async fn suggested_entries(
        &self,
        description: &IncidentDescription,
    ) -> Result<Vec<SuggestedEntry>, ApiFailure> {
        let body = json!({
            "description": description.as_str(),
            "limit": SUGGESTION_LIMIT,
        });
        let response = self.post_json("/suggested-kedbs", body).await?;
        parse_suggestions(response)
    }

    async fn generated_content(
        &self,
        description: &IncidentDescription,
    ) -> Result<String, ApiFailure> {
        let body = json!({
            "description": description.as_str(),
            "includeSteps": true,
            "format": "markdown",
        });
        let response = self.post_json("/generate-kedb", body).await?;
        parse_generated(response)
    }

    async fn entry_by_id(&self, id: &str) -> Result<SuggestedEntry, ApiFailure> {
        let response = self.get_json(&format!("/kedb/{id}")).await?;
        serde_json::from_value(response)
            .map_err(|e| ApiFailure(format!("unrecognised entry response shape: {e}")))
    }
}
