//! Normalized card state.

use chrono::{DateTime, FixedOffset};

use super::Station;

/// One leg of a trip: where and when the card touched a gate.
#[derive(Debug, Clone, PartialEq)]
pub struct TripLeg {
    pub station: Station,
    pub time: DateTime<FixedOffset>,
}

/// A single journey from the card's transaction history.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Purse value after this trip, in euro cents as reported upstream.
    pub balance: f64,
    pub departure: TripLeg,
    /// Absent while the journey is still open (no check-out yet).
    pub arrival: Option<TripLeg>,
}

/// Snapshot of everything the transaction endpoint reports about a card.
///
/// Recomputed wholesale on every cache miss; never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    /// True when the most recent trip has no arrival leg yet.
    pub checked_in: bool,
    /// Purse value after the most recent trip; `None` when the card has
    /// no transactions at all.
    pub balance: Option<f64>,
    /// Most recent trip first, the order the upstream serves them in.
    pub trips: Vec<Trip>,
}
