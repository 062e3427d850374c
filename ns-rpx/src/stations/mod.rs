//! Station directory: fetch, persistence and lookup.
//!
//! The station table maps station codes to metadata (country, UIC code,
//! coordinates, display names). It is loaded from a generated disk
//! artifact at startup and re-fetched from the stations endpoint when
//! that artifact is more than 60 days old.

mod client;
mod directory;
mod store;

pub use client::{NameRecord, StationRecord, StationsClient, StationsConfig, StationsResponse};
pub use directory::StationDirectory;
pub use store::{StationStore, StoreError};
