//! Live-travel components: train progress, disruptions, route planning
//! and departure boards.
//!
//! All four speak to the public mobile endpoints with the credential the
//! official apps embed. They share one [`TravelClient`] and consult the
//! station directory to attach metadata to the raw codes the feeds carry.

mod client;
mod convert;
mod departures;
mod disruptions;
mod planner;
mod train;
mod types;

pub use client::{TravelClient, TravelConfig};
pub use departures::DepartureBoard;
pub use disruptions::DisruptionFeed;
pub use planner::RoutePlanner;
pub use train::Train;
pub use types::{
    ActueleVertrekTijden, DepartureRecord, DisruptionRecord, DisruptionsResponse, LegRecord,
    LegStopRecord, PunctualityRecord, ReisMogelijkheden, RouteOptionRecord, ServiceInfo,
    ServiceInfoList, StopList, StopRecord, TrackRecord, TrackSectionRecord,
};
