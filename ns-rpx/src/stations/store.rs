//! On-disk persistence for the station table.
//!
//! The table is a generated artifact: it is rewritten after every
//! successful refresh and read back at startup so most process starts
//! need no network call at all.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationCode};

/// Serialized form: the retrieval timestamp plus the full table.
#[derive(Debug, Serialize, Deserialize)]
struct StoredStations {
    /// Unix timestamp of the retrieval that produced this table.
    retrieved_at_secs: u64,
    stations: HashMap<StationCode, Station>,
}

/// Error writing the station table to disk.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write station table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize station table: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Disk store for the station table.
#[derive(Debug, Clone)]
pub struct StationStore {
    path: PathBuf,
}

impl StationStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Try to load the persisted table.
    ///
    /// Returns the table and its age, or `None` when the file is missing
    /// or unreadable. Staleness is the caller's decision; even a very old
    /// table is returned.
    pub fn load(&self) -> Option<(HashMap<StationCode, Station>, Duration)> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredStations = serde_json::from_str(&contents).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();
        let age = Duration::from_secs(now.saturating_sub(stored.retrieved_at_secs));

        Some((stored.stations, age))
    }

    /// Persist a freshly retrieved table.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(
        &self,
        retrieved_at_secs: u64,
        stations: &HashMap<StationCode, Station>,
    ) -> Result<(), StoreError> {
        let stored = StoredStations {
            retrieved_at_secs,
            stations: stations.clone(),
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(&stored)?;
        std::fs::write(&self.path, json)?;

        Ok(())
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
