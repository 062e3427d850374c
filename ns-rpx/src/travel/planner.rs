//! Route planning between two or three stations.

use chrono::{Local, NaiveDateTime};

use crate::domain::RouteOption;
use crate::error::Error;
use crate::stations::StationDirectory;

use super::client::TravelClient;
use super::convert::convert_route_options;
use super::types::ReisMogelijkheden;

/// Caller id the mobile planner expects on every request.
const CALLER_ID: &str = "RPX:reisadvies";

/// Query-time format of the planner endpoint.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// The route planner.
pub struct RoutePlanner {
    client: TravelClient,
    stations: StationDirectory,
}

impl RoutePlanner {
    pub fn new(client: TravelClient, stations: StationDirectory) -> Self {
        Self { client, stations }
    }

    /// Plan a route along two (from/to) or three (from/via/to) stations,
    /// departing at `depart` (defaults to now).
    ///
    /// The station count is checked first ([`Error::MalformedRoute`]),
    /// then every code is validated against the directory
    /// ([`Error::InvalidStation`]); no request goes out until both pass.
    pub async fn plan(
        &self,
        codes: &[&str],
        depart: Option<NaiveDateTime>,
    ) -> Result<Vec<RouteOption>, Error> {
        if codes.len() < 2 || codes.len() > 3 {
            return Err(Error::MalformedRoute(codes.len()));
        }

        let mut resolved = Vec::with_capacity(codes.len());
        for code in codes {
            resolved.push(self.stations.lookup(code)?);
        }

        let depart = depart.unwrap_or_else(|| Local::now().naive_local());

        let (from, via, to) = match resolved.as_slice() {
            [from, to] => (from, None, to),
            [from, via, to] => (from, Some(via), to),
            _ => unreachable!("length checked above"),
        };

        let mut query = vec![("fromStation", from.code.to_string())];
        if let Some(via) = via {
            query.push(("viaStation", via.code.to_string()));
        }
        query.push(("toStation", to.code.to_string()));
        query.extend([
            ("callerid", CALLER_ID.to_string()),
            ("departure", "true".to_string()),
            ("hslAllowed", "true".to_string()),
            ("yearCard", "false".to_string()),
            ("minimalChangeTime", "0".to_string()),
            ("travelAdviceType", "OPTIMAL".to_string()),
            ("dateTime", depart.format(QUERY_TIME_FORMAT).to_string()),
            ("previousAdvices", "1".to_string()),
            ("nextAdvices", "6".to_string()),
            ("passing", "true".to_string()),
            ("product", "GEEN".to_string()),
        ]);

        let body = self.client.get_text("/mobile-api-planner", &query).await?;

        let parsed: ReisMogelijkheden = quick_xml::de::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("planner: {e}"), &body))?;

        convert_route_options(&parsed, &self.stations).map_err(|e| e.with_body(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::TravelConfig;
    use super::*;
    use crate::domain::{Country, DisplayNames, GeoPosition, Station, StationCode};
    use std::collections::HashMap;

    /// A planner whose client points nowhere routable; any attempt to
    /// reach the network would fail with a connection error, which lets
    /// the tests prove validation happens before any I/O.
    fn offline_planner() -> RoutePlanner {
        let client =
            TravelClient::new(TravelConfig::new().with_base_url("http://127.0.0.1:1")).unwrap();

        let mut table = HashMap::new();
        for code in ["LC", "MG", "RTB"] {
            let parsed = StationCode::parse(code).unwrap();
            table.insert(
                parsed.clone(),
                Station {
                    code: parsed,
                    country: Country::from_upstream("NL").unwrap(),
                    uic_code: "8400000".into(),
                    location: GeoPosition { lat: 52.0, lng: 4.9 },
                    names: DisplayNames {
                        full: code.into(),
                        short: code.into(),
                        tiny: code.into(),
                    },
                },
            );
        }

        RoutePlanner::new(client, StationDirectory::from_table(table))
    }

    #[tokio::test]
    async fn too_few_stations_is_malformed() {
        let planner = offline_planner();
        match planner.plan(&["LC"], None).await {
            Err(Error::MalformedRoute(1)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn too_many_stations_is_malformed() {
        let planner = offline_planner();
        match planner.plan(&["LC", "MG", "RTB", "LC"], None).await {
            Err(Error::MalformedRoute(4)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_station_fails_before_any_request() {
        let planner = offline_planner();

        // A connection error here would mean a request went out.
        match planner.plan(&["QQQ", "MG"], None).await {
            Err(Error::InvalidStation(code)) => assert_eq!(code, "QQQ"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn count_is_checked_before_codes() {
        let planner = offline_planner();

        // One unknown code, but the count is wrong first.
        match planner.plan(&["QQQ"], None).await {
            Err(Error::MalformedRoute(1)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
