//! Country codes for stations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error for a country token the upstream mapping does not cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown country token {0:?}")]
pub struct UnknownCountry(pub String);

/// A two-letter country code ("NL", "DE", "BE").
///
/// The station feed mostly serves two-letter codes but still emits a
/// handful of legacy single-letter ones; [`Country::from_upstream`]
/// translates those through a fixed table and rejects everything else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Country([u8; 2]);

/// Legacy single-letter tokens still present in the station feed.
const LEGACY_TOKENS: [(&str, &str); 6] = [
    ("A", "AT"),
    ("B", "BE"),
    ("D", "DE"),
    ("F", "FR"),
    ("H", "HU"),
    ("I", "IT"),
];

impl Country {
    /// Map an upstream country token: two-letter codes pass through
    /// upper-cased, single-letter legacy codes go through the fixed table.
    pub fn from_upstream(token: &str) -> Result<Self, UnknownCountry> {
        if token.len() == 1 {
            let translated = LEGACY_TOKENS
                .iter()
                .find(|(legacy, _)| token.eq_ignore_ascii_case(legacy))
                .map(|(_, full)| *full);
            return match translated {
                Some(full) => Ok(Self::from_two_letters(full).unwrap()),
                None => Err(UnknownCountry(token.to_string())),
            };
        }

        Self::from_two_letters(token).ok_or_else(|| UnknownCountry(token.to_string()))
    }

    fn from_two_letters(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        Some(Country([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl TryFrom<String> for Country {
    type Error = UnknownCountry;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Country::from_upstream(&s)
    }
}

impl From<Country> for String {
    fn from(country: Country) -> String {
        country.as_str().to_string()
    }
}

impl fmt::Debug for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Country({})", self.as_str())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
