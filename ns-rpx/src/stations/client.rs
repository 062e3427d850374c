//! Station table endpoint client.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::error::Error;

/// Default base URL for the station metadata API.
const DEFAULT_BASE_URL: &str = "https://reisinfo.ns-mlab.nl";

/// The credential the official apps embed; the endpoint accepts no other.
const PUBLIC_AUTHORIZATION: &str = "Basic YW5kcm9pZDptdmR6aWc=";

/// User agent the endpoint expects.
const CLIENT_USER_AGENT: &str = "Apache-HttpClient/UNAVAILABLE (java 1.4)";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Wrapper around the stations payload.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    pub payload: Vec<StationRecord>,
}

/// Raw station record, with the upstream's Dutch field names.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub code: String,

    /// Country token; a two-letter ISO code or a one-letter legacy code.
    pub land: String,

    #[serde(rename = "UICCode")]
    pub uic_code: String,

    pub lat: f64,
    pub lng: f64,

    pub namen: NameRecord,
}

/// The three display-name variants.
#[derive(Debug, Clone, Deserialize)]
pub struct NameRecord {
    pub lang: String,
    pub middel: String,
    pub kort: String,
}

/// Configuration for the stations client.
#[derive(Debug, Clone)]
pub struct StationsConfig {
    /// Base URL for the API (defaults to production).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StationsConfig {
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

impl Default for StationsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the station table endpoint.
#[derive(Debug, Clone)]
pub struct StationsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationsClient {
    /// Create a new stations client.
    pub fn new(config: StationsConfig) -> Result<Self, Error> {
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

    /// Fetch the full station table.
    pub async fn fetch_all(&self) -> Result<Vec<StationRecord>, Error> {
        let url = format!("{}/api/v2/stations", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(Error::invalid_response(
                format!("stations request returned status {status}"),
                &body,
            ));
        }

        let parsed: StationsResponse = serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("stations payload: {e}"), &body))?;

        Ok(parsed.payload)
    }
}
