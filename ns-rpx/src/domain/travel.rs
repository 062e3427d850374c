//! Normalized live-travel types: train progress, disruptions, route
//! options and departure boards.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use super::Station;

/// Scheduled and actual time of one arrival or departure event on a live
/// train. Times are local wall-clock, the way the serviceinfo feed
/// announces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub scheduled: NaiveDateTime,
    /// Scheduled time plus the announced delay; equals `scheduled` when
    /// no delay is announced.
    pub actual: NaiveDateTime,
}

/// Optional per-stop annotations from the serviceinfo feed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StopMeta {
    pub expected_passengers: Option<u32>,
    /// Percentage of recent services that arrived here on time.
    pub arrived_on_time: Option<f64>,
    /// Percentage of recent services that departed here on time.
    pub departed_on_time: Option<f64>,
}

/// One stop (or passage) on a live train's route.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainStop {
    pub station: Station,
    /// Whether the train actually calls here.
    pub stops: bool,
    pub arrival: Option<StopTime>,
    pub departure: Option<StopTime>,
    pub meta: StopMeta,
}

/// Live progress of a single train.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainProgress {
    /// Transport mode code as announced upstream ("IC", "SPR", ...).
    pub transport_type: String,
    pub stops: Vec<TrainStop>,
}

/// A station caught in a disruption, with the window during which the
/// disruption applies to its stretch of track.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedStation {
    pub station: Station,
    pub starts: Option<DateTime<FixedOffset>>,
    pub ends: Option<DateTime<FixedOffset>>,
}

/// A current or planned disruption on the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Disruption {
    pub id: String,
    pub title: String,
    pub cause: String,
    pub effect: String,
    pub stations: Vec<AffectedStation>,
}

/// Scheduled and actual time at a route option's endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedTime {
    pub scheduled: DateTime<FixedOffset>,
    pub actual: DateTime<FixedOffset>,
}

/// Which side to leave the train on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSide {
    Left,
    Right,
}

/// A stop inside a route leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegStop {
    pub station: Station,
    /// True when the train passes without calling.
    pub is_nonstop: bool,
    pub time: Option<DateTime<FixedOffset>>,
    pub track: Option<String>,
}

/// One vehicle of a route option.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub provider: String,
    pub train_id: String,
    pub is_as_scheduled: bool,
    pub final_destination: Option<String>,
    pub exit_side: Option<ExitSide>,
    pub stops: Vec<LegStop>,
}

/// One planned journey returned by the route planner.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOption {
    pub transfers: u32,
    pub is_as_scheduled: bool,
    pub departure: PlannedTime,
    pub arrival: PlannedTime,
    pub legs: Vec<Leg>,
}

/// One row of a station departure board.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub final_destination: String,
    pub train_id: String,
    /// Rolling-stock/service type as announced ("Intercity", "Sprinter").
    pub train_type: String,
    pub track: String,
    pub time: DateTime<FixedOffset>,
    pub provider: String,
}
