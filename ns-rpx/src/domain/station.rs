//! Station code and station metadata types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::country::Country;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A station code on the Dutch rail network ("ASD", "GVC", "MG", "LEDN").
///
/// Codes are one to eight ASCII letters or digits and are compared
/// upper-cased; `parse` upper-cases its input, so lookups are
/// case-insensitive at the edges.
///
/// # Examples
///
/// ```
/// use ns_rpx::domain::StationCode;
///
/// let asd = StationCode::parse("asd").unwrap();
/// assert_eq!(asd.as_str(), "ASD");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("TOO-LONG!").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    /// Maximum code length seen in the upstream station table.
    const MAX_LEN: usize = 8;

    /// Parse a station code, upper-casing it.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }
        if s.len() > Self::MAX_LEN {
            return Err(InvalidStationCode {
                reason: "must be at most 8 characters",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStationCode {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(StationCode(s.to_ascii_uppercase()))
    }

    /// Returns the upper-cased code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StationCode::parse(&s)
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> String {
        code.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position of a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

/// The three display-name variants the upstream carries per station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNames {
    /// Full name ("Amsterdam Centraal").
    pub full: String,
    /// Medium name ("Amsterdam C.").
    pub short: String,
    /// Abbreviated name ("Adam C").
    pub tiny: String,
}

/// Station metadata from the station directory.
///
/// Immutable once loaded; a refresh replaces the whole table rather than
/// individual entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub code: StationCode,
    pub country: Country,
    /// International (UIC) station identifier, distinct from `code`.
    pub uic_code: String,
    pub location: GeoPosition,
    pub names: DisplayNames,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("ASD").is_ok());
        assert!(StationCode::parse("MG").is_ok());
        assert!(StationCode::parse("LEDN").is_ok());
        assert!(StationCode::parse("K").is_ok());
    }

    #[test]
    fn parse_upper_cases() {
        assert_eq!(StationCode::parse("gvc").unwrap().as_str(), "GVC");
        assert_eq!(StationCode::parse("Ledn").unwrap().as_str(), "LEDN");
    }

    #[test]
    fn reject_empty_and_oversized() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("ABCDEFGHI").is_err());
    }

    #[test]
    fn reject_non_alphanumeric() {
        assert!(StationCode::parse("A D").is_err());
        assert!(StationCode::parse("A-D").is_err());
        assert!(StationCode::parse("AÖD").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("RTB").unwrap();
        assert_eq!(format!("{code}"), "RTB");
        assert_eq!(format!("{code:?}"), "StationCode(RTB)");
    }

    #[test]
    fn serde_round_trip_validates() {
        let code: StationCode = serde_json::from_str("\"utg\"").unwrap();
        assert_eq!(code.as_str(), "UTG");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"UTG\"");

        assert!(serde_json::from_str::<StationCode>("\"not a code\"").is_err());
    }
}
