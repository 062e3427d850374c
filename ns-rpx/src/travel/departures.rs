//! Live departure boards.

use crate::domain::Departure;
use crate::error::Error;
use crate::stations::StationDirectory;

use super::client::TravelClient;
use super::convert::convert_departures;
use super::types::ActueleVertrekTijden;

/// Live departures per station.
pub struct DepartureBoard {
    client: TravelClient,
    stations: StationDirectory,
}

impl DepartureBoard {
    pub fn new(client: TravelClient, stations: StationDirectory) -> Self {
        Self { client, stations }
    }

    /// The departure list for one station.
    ///
    /// The code is validated against the directory before the request
    /// goes out; an unknown code fails with [`Error::InvalidStation`]
    /// and no I/O happens.
    pub async fn departures(&self, station_code: &str) -> Result<Vec<Departure>, Error> {
        let station = self.stations.lookup(station_code)?;

        let query = [("station", station.code.to_string())];
        let body = self.client.get_text("/mobile-api-avt", &query).await?;

        let parsed: ActueleVertrekTijden = quick_xml::de::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("avt: {e}"), &body))?;

        convert_departures(&parsed).map_err(|e| e.with_body(&body))
    }
}
