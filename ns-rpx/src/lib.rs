//! Client for the NS private mobile/web APIs.
//!
//! Authenticates an account, reads card trips and balances, follows live
//! train progress, plans routes, lists departures and network
//! disruptions, and normalizes the mix of JSON and XML the backends
//! speak into one domain model. Every remote resource is cached for a
//! bounded window so the undocumented, rate-limited endpoints are not
//! hammered.

pub mod account;
pub mod cache;
pub mod domain;
pub mod error;
pub mod stations;
pub mod travel;

pub use error::Error;
