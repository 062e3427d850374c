//! Domain types for the NS client.
//!
//! This is the uniform object model every upstream payload is normalized
//! into. Validated types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod card;
mod country;
mod station;
mod travel;

pub use card::{CardState, Trip, TripLeg};
pub use country::{Country, UnknownCountry};
pub use station::{DisplayNames, GeoPosition, InvalidStationCode, Station, StationCode};
pub use travel::{
    AffectedStation, Departure, Disruption, ExitSide, Leg, LegStop, PlannedTime, RouteOption,
    StopMeta, StopTime, TrainProgress, TrainStop,
};
