//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::{debug, error};
use url::Url;

use crate::errors::{DashboardError, FetchError};

/// Default transport timeout for requests to the status server
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the SwarmCD status server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str) -> Result<Self, DashboardError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a transport timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL by appending percent-encoded path segments to
    /// the base URL
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Transport(format!("invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("base URL {} cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request and return the response body as text
    pub async fn get_text(&self, url: Url, accept: &str) -> Result<String, FetchError> {
        let response = self.send_get(url, accept).await?;
        let body = response.text().await?;
        Ok(body)
    }

    async fn send_get(&self, url: Url, accept: &str) -> Result<Response, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET failed: {} - {}", status, body);
            return Err(FetchError::Transport(format!("{}: {}", status, body.trim())));
        }

        Ok(response)
    }
}
