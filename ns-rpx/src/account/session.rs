//! Account session and the login handshake.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::Error;
use crate::stations::StationDirectory;

use super::card::Card;
use super::types::CardList;

/// Default base URL for the account endpoints.
const DEFAULT_BASE_URL: &str = "https://ews-rpx.ns.nl";

/// User agent of the official client; the backend is picky about it.
const CLIENT_USER_AGENT: &str = "Google-HTTP-Java-Client/1.19.0 (gzip)";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The backend has been seen answering a rejected login with a 200 page
/// containing this phrase instead of a proper status code.
const UNAUTHORIZED_PHRASE: &str = "401 Unauthorized";

/// Configuration for an account session.
///
/// Credentials live here only long enough to derive the auth header;
/// nothing is ever persisted.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub username: String,
    pub password: String,
    /// Base URL for the account endpoints (defaults to production).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SessionConfig {
    /// Create a config for the given credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
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

/// An authenticated account session owning the cards found at login.
///
/// The session's auth headers are baked into its HTTP client at login and
/// never mutated afterwards; request-specific headers are overlaid per
/// call. Every card shares that client, so the two-step card flow rides
/// on the same identity without any shared mutable state.
pub struct Session {
    username: String,
    cards: Vec<Card>,
}

impl Session {
    /// Authenticate and enumerate the account's cards.
    ///
    /// The credential token is the Basic-auth encoding of
    /// `username:password`. A rejected login fails with
    /// [`Error::InvalidCredentials`]; a transport failure with
    /// [`Error::Connection`]. There is no explicit logout; the session
    /// simply ends with the process.
    pub async fn login(
        config: SessionConfig,
        stations: StationDirectory,
    ) -> Result<Session, Error> {
        let token = BASE64.encode(format!("{}:{}", config.username, config.password));

        let mut auth = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|_| Error::InvalidCredentials)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = format!("{}/private-reistransacties-api/service/cards", config.base_url);
        let response = http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // The status code is checked first, but the phrase fallback is
        // load-bearing: the backend does not reliably set codes.
        if status == StatusCode::UNAUTHORIZED || body.contains(UNAUTHORIZED_PHRASE) {
            return Err(Error::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(Error::invalid_response(
                format!("card list returned status {status}"),
                &body,
            ));
        }

        let list: CardList = serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("card list: {e}"), &body))?;

        let cards = list
            .cards
            .into_iter()
            .map(|entry| {
                Card::new(
                    entry.ovcp_number,
                    http.clone(),
                    config.base_url.clone(),
                    stations.clone(),
                )
            })
            .collect();

        Ok(Session {
            username: config.username,
            cards,
        })
    }

    /// The account's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// All cards found at login.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up an owned card by number.
    pub fn card(&self, number: &str) -> Result<&Card, Error> {
        self.cards
            .iter()
            .find(|card| card.number() == number)
            .ok_or_else(|| Error::InvalidCard(number.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn session_with_cards(numbers: &[&str]) -> Session {
        let http = reqwest::Client::new();
        let stations = StationDirectory::from_table(HashMap::new());
        Session {
            username: "test".into(),
            cards: numbers
                .iter()
                .map(|n| {
                    Card::new(
                        n.to_string(),
                        http.clone(),
                        DEFAULT_BASE_URL.to_string(),
                        stations.clone(),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn config_builder() {
        let config = SessionConfig::new("user", "pass")
            .with_base_url("http://localhost:8080")
            .with_timeout(5);

        assert_eq!(config.username, "user");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn card_lookup_by_number() {
        let session = session_with_cards(&["111", "222"]);

        assert_eq!(session.cards().len(), 2);
        assert_eq!(session.card("222").unwrap().number(), "222");
    }

    #[test]
    fn unowned_card_number_is_rejected() {
        let session = session_with_cards(&["111"]);

        match session.card("999") {
            Err(Error::InvalidCard(number)) => assert_eq!(number, "999"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
