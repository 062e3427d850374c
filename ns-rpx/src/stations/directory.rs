//! The station directory: code → metadata lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

use crate::domain::{Country, DisplayNames, GeoPosition, Station, StationCode};
use crate::error::Error;

use super::client::{StationRecord, StationsClient};
use super::store::StationStore;

/// A persisted table older than this is refreshed synchronously before
/// the directory is handed out.
const MAX_TABLE_AGE: Duration = Duration::from_secs(60 * 24 * 60 * 60);

struct Table {
    stations: HashMap<StationCode, Station>,
    retrieved_at_secs: u64,
}

/// Thread-safe station lookup table.
///
/// Loaded once at startup, shared by every component that needs to turn
/// raw station codes into metadata. Cheap to clone. Unknown codes are a
/// hard [`Error::InvalidStation`], never silently dropped.
#[derive(Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<Table>>,
    client: StationsClient,
    store: Option<StationStore>,
}

impl StationDirectory {
    /// Open the directory from a disk store, refreshing first when the
    /// persisted table is missing or more than 60 days old.
    pub async fn open(client: StationsClient, store: StationStore) -> Result<Self, Error> {
        let loaded = store.load();

        let directory = match &loaded {
            Some((stations, age)) => Self::assemble(
                stations.clone(),
                age_to_retrieved_secs(*age),
                client,
                Some(store),
            ),
            None => Self::assemble(HashMap::new(), 0, client, Some(store)),
        };

        match loaded {
            Some((_, age)) if age <= MAX_TABLE_AGE => {}
            _ => {
                directory.refresh().await?;
            }
        }

        Ok(directory)
    }

    /// Build the directory straight from the network, without a store.
    pub async fn fetch(client: StationsClient) -> Result<Self, Error> {
        let directory = Self::assemble(HashMap::new(), 0, client, None);
        directory.refresh().await?;
        Ok(directory)
    }

    /// Build a directory from an existing table. Useful in tests and for
    /// callers that manage persistence themselves.
    pub fn from_table(stations: HashMap<StationCode, Station>) -> Self {
        let client = StationsClient::new(super::client::StationsConfig::new())
            .expect("static stations config is always valid");
        Self::assemble(stations, now_secs(), client, None)
    }

    fn assemble(
        stations: HashMap<StationCode, Station>,
        retrieved_at_secs: u64,
        client: StationsClient,
        store: Option<StationStore>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Table {
                stations,
                retrieved_at_secs,
            })),
            client,
            store,
        }
    }

    /// Look up a station by code. The code is upper-cased before lookup.
    pub fn lookup(&self, code: &str) -> Result<Station, Error> {
        let parsed =
            StationCode::parse(code).map_err(|_| Error::InvalidStation(code.to_string()))?;

        let table = self.inner.read().expect("station table lock poisoned");
        table
            .stations
            .get(&parsed)
            .cloned()
            .ok_or_else(|| Error::InvalidStation(code.to_string()))
    }

    /// Number of stations in the table.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("station table lock poisoned")
            .stations
            .len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-fetch the table from the stations endpoint and atomically
    /// replace the in-memory one, together with the retrieval timestamp.
    ///
    /// On failure the old table is kept and the error is returned. On
    /// success the table is also rewritten to the disk store, when one is
    /// configured; a write failure there only logs a warning, since the
    /// in-memory refresh already succeeded.
    pub async fn refresh(&self) -> Result<usize, Error> {
        let records = self.client.fetch_all().await?;
        let stations = build_table(records)?;
        let count = stations.len();
        let retrieved_at_secs = now_secs();

        {
            let mut table = self.inner.write().expect("station table lock poisoned");
            *table = Table {
                stations,
                retrieved_at_secs,
            };
        }

        if let Some(store) = &self.store {
            let table = self.inner.read().expect("station table lock poisoned");
            if let Err(e) = store.save(table.retrieved_at_secs, &table.stations) {
                warn!(path = %store.path().display(), error = %e, "could not persist station table");
            }
        }

        info!(count, "station table refreshed");
        Ok(count)
    }
}

/// Map raw records into the domain table. Bad codes or country tokens
/// are upstream contract drift and fail the whole refresh.
fn build_table(records: Vec<StationRecord>) -> Result<HashMap<StationCode, Station>, Error> {
    let mut stations = HashMap::with_capacity(records.len());

    for record in records {
        let code = StationCode::parse(&record.code).map_err(|e| Error::InvalidResponse {
            message: format!("station code {:?}: {e}", record.code),
            body: None,
        })?;
        let country = Country::from_upstream(&record.land).map_err(|e| Error::InvalidResponse {
            message: format!("station {}: {e}", code),
            body: None,
        })?;

        let station = Station {
            code: code.clone(),
            country,
            uic_code: record.uic_code,
            location: GeoPosition {
                lat: record.lat,
                lng: record.lng,
            },
            names: DisplayNames {
                full: record.namen.lang,
                short: record.namen.middel,
                tiny: record.namen.kort,
            },
        };

        stations.insert(code, station);
    }

    Ok(stations)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn age_to_retrieved_secs(age: Duration) -> u64 {
    now_secs().saturating_sub(age.as_secs())
}

#[cfg(test)]
mod tests {
    use super::super::client::NameRecord;
    use super::*;

    fn record(code: &str, land: &str) -> StationRecord {
        StationRecord {
            code: code.into(),
            land: land.into(),
            uic_code: "8400000".into(),
            lat: 52.0,
            lng: 4.9,
            namen: NameRecord {
                lang: format!("{code} Centraal"),
                middel: code.into(),
                kort: code.into(),
            },
        }
    }

    #[test]
    fn build_table_maps_countries() {
        let table = build_table(vec![record("ASD", "NL"), record("AHBF", "D")]).unwrap();

        let asd = &table[&StationCode::parse("ASD").unwrap()];
        assert_eq!(asd.country.as_str(), "NL");

        let aachen = &table[&StationCode::parse("AHBF").unwrap()];
        assert_eq!(aachen.country.as_str(), "DE");
    }

    #[test]
    fn build_table_rejects_unknown_country_token() {
        let err = build_table(vec![record("ASD", "Q")]).unwrap_err();
        match err {
            Error::InvalidResponse { message, .. } => {
                assert!(message.contains("unknown country token"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn build_table_rejects_malformed_code() {
        let err = build_table(vec![record("NOT A CODE", "NL")]).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse { .. }));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = build_table(vec![record("GVC", "NL")]).unwrap();
        let directory = StationDirectory::from_table(table);

        assert_eq!(directory.lookup("gvc").unwrap().code.as_str(), "GVC");
        assert_eq!(directory.lookup("GVC").unwrap().code.as_str(), "GVC");
    }

    #[test]
    fn lookup_unknown_code_fails_hard() {
        let directory = StationDirectory::from_table(HashMap::new());

        match directory.lookup("XYZ") {
            Err(Error::InvalidStation(code)) => assert_eq!(code, "XYZ"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lookup_syntactically_invalid_code_fails_the_same_way() {
        let directory = StationDirectory::from_table(HashMap::new());

        assert!(matches!(
            directory.lookup("not a code"),
            Err(Error::InvalidStation(_))
        ));
    }
}
