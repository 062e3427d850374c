//! Shared plumbing for the public live-travel endpoints.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::Error;

/// Default base URL for the live-travel endpoints.
const DEFAULT_BASE_URL: &str = "https://ews-rpx.ns.nl";

/// The credential the official apps embed; these endpoints accept no
/// other.
const PUBLIC_AUTHORIZATION: &str = "Basic YW5kcm9pZDptdmR6aWc=";

/// User agent of the mobile client these endpoints expect.
const CLIENT_USER_AGENT: &str = "ReisplannerXtra/5.0.14";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the travel client.
#[derive(Debug, Clone)]
pub struct TravelConfig {
    /// Base URL for the API (defaults to production).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TravelConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client shared by the train, disruption, planner and departure
/// components. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TravelClient {
    http: reqwest::Client,
    base_url: String,
}

impl TravelClient {
    /// Create a new travel client.
    pub fn new(config: TravelConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(PUBLIC_AUTHORIZATION));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// GET a path and hand back the raw body, mapping transport failures
    /// to [`Error::Connection`] and non-success statuses to
    /// [`Error::InvalidResponse`].
    pub(crate) async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::invalid_response(
                format!("{path} returned status {status}"),
                &body,
            ));
        }

        Ok(body)
    }
}
