//! Current and planned network disruptions.

use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::cache::{DISRUPTION_TTL, TtlSlot};
use crate::domain::Disruption;
use crate::error::Error;
use crate::stations::StationDirectory;

use super::client::TravelClient;
use super::convert::{convert_disruptions, merge_disruptions};
use super::types::{DisruptionRecord, DisruptionsResponse};

/// The single process-wide disruption slot. Every feed instance shares
/// it, so independent callers cannot stampede the upstream between them.
static SHARED_SLOT: LazyLock<TtlSlot<Vec<Disruption>>> =
    LazyLock::new(|| TtlSlot::new(DISRUPTION_TTL));

/// The network-wide disruption feed.
pub struct DisruptionFeed {
    client: TravelClient,
    stations: StationDirectory,
}

impl DisruptionFeed {
    pub fn new(client: TravelClient, stations: StationDirectory) -> Self {
        Self { client, stations }
    }

    /// The merged current + planned disruption list, refreshed at most
    /// every 60 seconds across the whole process.
    ///
    /// Planned entries win over current ones with the same id;
    /// current-only entries are appended after, order preserved.
    pub async fn disruptions(&self) -> Result<Arc<Vec<Disruption>>, Error> {
        SHARED_SLOT.get_or_refresh(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<Vec<Disruption>, Error> {
        let current = self.fetch_list(("actual", "true")).await?;
        let planned = self.fetch_list(("type", "werkzaamheid")).await?;

        debug!(
            current = current.len(),
            planned = planned.len(),
            "merging disruption lists"
        );

        let merged = merge_disruptions(planned, current);
        convert_disruptions(&merged, &self.stations)
    }

    async fn fetch_list(&self, filter: (&str, &str)) -> Result<Vec<DisruptionRecord>, Error> {
        let query = [(filter.0, filter.1.to_string())];
        let body = self
            .client
            .get_text("/private-ns-api/json/v1/verstoringen", &query)
            .await?;

        let parsed: DisruptionsResponse = serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("verstoringen: {e}"), &body))?;

        Ok(parsed.payload)
    }
}
