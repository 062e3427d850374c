//! A single OV-chipcard and its cached transaction state.

use std::sync::Arc;

use chrono::DateTime;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use crate::cache::{CARD_STATE_TTL, TtlSlot};
use crate::domain::{CardState, Trip, TripLeg};
use crate::error::Error;
use crate::stations::StationDirectory;

use super::types::{SelectCard, TransactionLeg, TransactionList, TransactionRecord};

/// Timestamp format of the transaction feed.
const TRANSACTION_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S %:z";

/// The rate-limit phrase the card-selection endpoint puts in an otherwise
/// ordinary 200 body.
const RATE_LIMIT_PHRASE: &str = "Minimum request interval exceeded";

/// One transit card of an authenticated session.
///
/// State reads go through a two-step flow the caller never sees: the
/// card-selection token ("CID") is resolved lazily on the first state
/// access and kept for the card's lifetime, then transactions are fetched
/// against it and cached for 240 seconds.
pub struct Card {
    number: String,
    http: reqwest::Client,
    base_url: String,
    stations: StationDirectory,
    cid: OnceCell<String>,
    state: TtlSlot<CardState>,
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.number)
            .finish_non_exhaustive()
    }
}

impl Card {
    pub(crate) fn new(
        number: String,
        http: reqwest::Client,
        base_url: String,
        stations: StationDirectory,
    ) -> Self {
        Self {
            number,
            http,
            base_url,
            stations,
            cid: OnceCell::new(),
            state: TtlSlot::new(CARD_STATE_TTL),
        }
    }

    /// The card number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Resolve the card-selection token, once per card.
    ///
    /// The endpoint is strictly rate limited upstream; on
    /// [`Error::TooManyRequests`] the caller should back off a minute or
    /// two. This crate never retries by itself.
    async fn cid(&self) -> Result<&str, Error> {
        self.cid
            .get_or_try_init(|| async {
                let url = format!(
                    "{}/private-reistransacties-api/service/selectcard/{}",
                    self.base_url, self.number
                );

                let response = self
                    .http
                    .post(&url)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .send()
                    .await?;
                let status = response.status();
                let body = response.text().await?;

                if status == StatusCode::TOO_MANY_REQUESTS || body.contains(RATE_LIMIT_PHRASE) {
                    return Err(Error::TooManyRequests);
                }
                if !status.is_success() {
                    return Err(Error::invalid_response(
                        format!("card selection returned status {status}"),
                        &body,
                    ));
                }

                let selected: SelectCard = serde_json::from_str(&body)
                    .map_err(|e| Error::invalid_response(format!("card selection: {e}"), &body))?;

                debug!(card = %self.number, "card selection token resolved");
                Ok(selected.cid)
            })
            .await
            .map(String::as_str)
    }

    /// The card's full normalized state, refreshed at most every 240
    /// seconds. A failed refresh surfaces its error without clobbering
    /// the previous snapshot.
    pub async fn state(&self) -> Result<Arc<CardState>, Error> {
        self.state.get_or_refresh(|| self.fetch_state()).await
    }

    /// Whether the card is currently checked in.
    pub async fn checked_in(&self) -> Result<bool, Error> {
        Ok(self.state().await?.checked_in)
    }

    /// Purse balance after the most recent trip, in euro cents. `None`
    /// when the card has no transactions.
    pub async fn balance(&self) -> Result<Option<f64>, Error> {
        Ok(self.state().await?.balance)
    }

    /// Trip history, most recent first.
    pub async fn trips(&self) -> Result<Vec<Trip>, Error> {
        Ok(self.state().await?.trips.clone())
    }

    async fn fetch_state(&self) -> Result<CardState, Error> {
        let cid = self.cid().await?;
        let url = format!(
            "{}/private-reistransacties-api/service/transactions/{}",
            self.base_url, cid
        );

        let response = self
            .http
            .get(&url)
            .header("X-Request-ID", Uuid::new_v4().to_string())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::invalid_response(
                format!("transactions returned status {status}"),
                &body,
            ));
        }

        let list: TransactionList = serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("transactions: {e}"), &body))?;

        build_state(&list.transactions, &self.stations).map_err(|e| e.with_body(&body))
    }
}

/// Normalize raw transactions into a [`CardState`].
///
/// The first (most recent) transaction carries the card's balance; a
/// missing arrival on it means the card is still checked in.
fn build_state(
    records: &[TransactionRecord],
    stations: &StationDirectory,
) -> Result<CardState, Error> {
    let mut state = CardState {
        checked_in: false,
        balance: records.first().map(|t| t.remaining_purse_value),
        trips: Vec::with_capacity(records.len()),
    };

    for (index, record) in records.iter().enumerate() {
        let departure = convert_leg(&record.departure, stations)?;
        let arrival = match &record.arrival {
            Some(leg) => Some(convert_leg(leg, stations)?),
            None => {
                if index == 0 {
                    state.checked_in = true;
                }
                None
            }
        };

        state.trips.push(Trip {
            balance: record.remaining_purse_value,
            departure,
            arrival,
        });
    }

    Ok(state)
}

fn convert_leg(leg: &TransactionLeg, stations: &StationDirectory) -> Result<TripLeg, Error> {
    let station = stations.lookup(&leg.station.station_code)?;
    let time = DateTime::parse_from_str(&leg.timestamp, TRANSACTION_TIME_FORMAT).map_err(|e| {
        Error::InvalidResponse {
            message: format!("transaction timestamp {:?}: {e}", leg.timestamp),
            body: None,
        }
    })?;

    Ok(TripLeg { station, time })
}
