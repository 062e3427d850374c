//! Live progress of a single train.

use std::sync::Arc;

use chrono::Local;

use crate::cache::{TRAIN_PROGRESS_TTL, TtlSlot};
use crate::domain::{TrainProgress, TrainStop};
use crate::error::Error;
use crate::stations::StationDirectory;

use super::client::TravelClient;
use super::convert::convert_progress;
use super::types::ServiceInfoList;

/// Handle on one train's live progress.
///
/// Progress is cached per handle for 240 seconds; keep the handle around
/// while following a train instead of creating a fresh one per read.
pub struct Train {
    id: String,
    provider: String,
    client: TravelClient,
    stations: StationDirectory,
    state: TtlSlot<TrainProgress>,
}

impl Train {
    /// Create a handle for the train with the given number. The provider
    /// code is case-folded the way the upstream expects.
    pub fn new(
        id: impl Into<String>,
        provider: &str,
        client: TravelClient,
        stations: StationDirectory,
    ) -> Self {
        Self {
            id: id.into(),
            provider: provider.to_lowercase(),
            client,
            stations,
            state: TtlSlot::new(TRAIN_PROGRESS_TTL),
        }
    }

    /// The train number.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The operating company code, case-folded.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Live progress: stop list with delays and punctuality, refreshed at
    /// most every 240 seconds.
    pub async fn progress(&self) -> Result<Arc<TrainProgress>, Error> {
        self.state.get_or_refresh(|| self.fetch_progress()).await
    }

    /// Transport mode code ("IC", "SPR", ...), via the cached progress.
    pub async fn transport_type(&self) -> Result<String, Error> {
        Ok(self.progress().await?.transport_type.clone())
    }

    /// Stop list, via the cached progress.
    pub async fn stops(&self) -> Result<Vec<TrainStop>, Error> {
        Ok(self.progress().await?.stops.clone())
    }

    async fn fetch_progress(&self) -> Result<TrainProgress, Error> {
        let query = [
            ("ritnummer", self.id.clone()),
            ("companycode", self.provider.clone()),
            (
                "datetime",
                Local::now().format("%Y-%m-%dT%H:%M").to_string(),
            ),
        ];

        let body = self.client.get_text("/mobile-api-serviceinfo", &query).await?;

        let parsed: ServiceInfoList = quick_xml::de::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("serviceinfo: {e}"), &body))?;

        convert_progress(&parsed.service_info, &self.stations).map_err(|e| e.with_body(&body))
    }
}
