//! Raw JSON shapes of the card endpoints.
//!
//! Field names are the upstream's, inconsistently cased. `Option` marks
//! fields the backend omits rather than nulls.

use serde::{Deserialize, Deserializer};

/// Some numeric identifiers arrive as JSON numbers or strings depending
/// on the backend version; absorb both.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Response of the card-list endpoint.
#[derive(Debug, Deserialize)]
pub struct CardList {
    pub cards: Vec<CardEntry>,
}

/// One card owned by the account.
#[derive(Debug, Deserialize)]
pub struct CardEntry {
    /// The card number printed on the OV-chipcard.
    #[serde(rename = "ovcpNumber", deserialize_with = "string_or_number")]
    pub ovcp_number: String,
}

/// Response of the card-selection endpoint.
#[derive(Debug, Deserialize)]
pub struct SelectCard {
    /// Session token required by the transactions endpoint.
    pub cid: String,
}

/// Response of the transactions endpoint.
#[derive(Debug, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<TransactionRecord>,
}

/// One travel transaction, most recent first in the list.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    /// Purse value after this transaction, in euro cents.
    #[serde(rename = "remainingPurseValue")]
    pub remaining_purse_value: f64,

    pub departure: TransactionLeg,

    /// Omitted while the journey is still open.
    pub arrival: Option<TransactionLeg>,
}

/// Check-in or check-out half of a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionLeg {
    pub station: TransactionStation,

    /// `"%d-%m-%Y %H:%M:%S +01:00"` format.
    pub timestamp: String,
}

/// Station reference inside a transaction leg.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionStation {
    #[serde(rename = "stationCode")]
    pub station_code: String,
}
