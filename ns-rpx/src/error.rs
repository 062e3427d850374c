//! Crate-wide error taxonomy.
//!
//! Every component signals the same fixed set of error kinds, and every
//! error surfaces synchronously to the immediate caller. Nothing in this
//! crate retries on its own; in particular, backing off after a
//! [`Error::TooManyRequests`] is the caller's job.

/// How much of a raw upstream body is kept for diagnostics.
const MAX_BODY_SNIPPET: usize = 500;

/// Errors produced by every component of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure on an upstream call (connect, TLS, timeout).
    #[error("could not connect to the NS servers: {0}")]
    Connection(#[from] reqwest::Error),

    /// The upstream rejected the username/password pair at login.
    #[error("the username or password is invalid")]
    InvalidCredentials,

    /// The card number is not owned by the authenticated session.
    #[error("card {0} is not registered to this account")]
    InvalidCard(String),

    /// The card-selection endpoint is strictly rate limited upstream.
    /// This clears up by itself after a minute or two.
    #[error("minimum request interval exceeded")]
    TooManyRequests,

    /// The upstream payload was missing expected fields or had the wrong
    /// shape. Carries a snippet of the raw body so contract drift can be
    /// diagnosed without re-fetching.
    #[error("unexpected response from the NS servers: {message}")]
    InvalidResponse {
        message: String,
        /// Truncated raw payload, when one was available.
        body: Option<String>,
    },

    /// A route query takes two (from/to) or three (from/via/to) stations.
    #[error("a route takes two or three stations, got {0}")]
    MalformedRoute(usize),

    /// The station code is absent from the station directory.
    #[error("{0:?} is not a valid station code")]
    InvalidStation(String),
}

impl Error {
    /// Build an [`Error::InvalidResponse`] carrying a truncated copy of
    /// the raw body.
    pub(crate) fn invalid_response(message: impl Into<String>, body: &str) -> Self {
        Error::InvalidResponse {
            message: message.into(),
            body: Some(truncate(body)),
        }
    }

    /// Attach a raw body to an [`Error::InvalidResponse`] produced deeper
    /// in the normalization layer, which does not see the wire payload.
    /// Other error kinds pass through untouched.
    pub(crate) fn with_body(self, body: &str) -> Self {
        match self {
            Error::InvalidResponse {
                message,
                body: None,
            } => Error::InvalidResponse {
                message,
                body: Some(truncate(body)),
            },
            other => other,
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_BODY_SNIPPET).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::InvalidCredentials;
        assert_eq!(err.to_string(), "the username or password is invalid");

        let err = Error::TooManyRequests;
        assert_eq!(err.to_string(), "minimum request interval exceeded");

        let err = Error::MalformedRoute(4);
        assert_eq!(err.to_string(), "a route takes two or three stations, got 4");

        let err = Error::InvalidStation("XYZ".into());
        assert_eq!(err.to_string(), "\"XYZ\" is not a valid station code");

        let err = Error::InvalidResponse {
            message: "missing field `cid`".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("unexpected response"));
        assert!(err.to_string().contains("missing field `cid`"));
    }

    #[test]
    fn invalid_response_truncates_body() {
        let long_body = "x".repeat(2000);
        let err = Error::invalid_response("too big", &long_body);
        match err {
            Error::InvalidResponse { body: Some(b), .. } => assert_eq!(b.len(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn with_body_fills_empty_slot_only() {
        let err = Error::InvalidResponse {
            message: "bad timestamp".into(),
            body: None,
        };
        match err.with_body("<xml/>") {
            Error::InvalidResponse { body: Some(b), .. } => assert_eq!(b, "<xml/>"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Error::InvalidStation("QQQ".into());
        match err.with_body("<xml/>") {
            Error::InvalidStation(code) => assert_eq!(code, "QQQ"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
