//! Normalization of raw travel payloads into the domain model.
//!
//! Everything here is pure: payload in, domain value or error out. The
//! components in this module's siblings do the fetching and feed the raw
//! shapes through these functions.

use std::collections::HashSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};

use crate::domain::{
    AffectedStation, Departure, Disruption, ExitSide, Leg, LegStop, PlannedTime, RouteOption,
    StopMeta, StopTime, TrainProgress, TrainStop,
};
use crate::error::Error;
use crate::stations::StationDirectory;

use super::types::{
    ActueleVertrekTijden, DepartureRecord, DisruptionRecord, LegRecord, LegStopRecord,
    ReisMogelijkheden, RouteOptionRecord, ServiceInfo, StopRecord,
};

/// Zoned time format of the planner, departure and disruption feeds;
/// the offset comes with or without a colon depending on the endpoint.
const ZONED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Status token meaning "nothing deviates".
const STATUS_AS_SCHEDULED: &str = "AS_SCHEDULED";

/// Stop-type token meaning the train calls at the stop.
const STOP_TYPE_CALLING: &str = "STOP";

fn bad(message: String) -> Error {
    Error::InvalidResponse {
        message,
        body: None,
    }
}

// --- train progress ---

pub(crate) fn convert_progress(
    info: &ServiceInfo,
    stations: &StationDirectory,
) -> Result<TrainProgress, Error> {
    let mut stops = Vec::with_capacity(info.stop_list.stops.len());
    for record in &info.stop_list.stops {
        stops.push(convert_train_stop(record, stations)?);
    }

    Ok(TrainProgress {
        transport_type: info.transport_mode_code.clone(),
        stops,
    })
}

fn convert_train_stop(
    record: &StopRecord,
    stations: &StationDirectory,
) -> Result<TrainStop, Error> {
    let station = stations.lookup(&record.stop_code)?;
    let arrival = convert_stop_time(record.arrival.as_deref(), record.arrival_time_delay.as_deref())?;
    let departure = convert_stop_time(
        record.departure.as_deref(),
        record.departure_time_delay.as_deref(),
    )?;

    Ok(TrainStop {
        station,
        stops: arrival.is_some() || departure.is_some(),
        arrival,
        departure,
        meta: convert_stop_meta(record)?,
    })
}

/// Apply the announced delay to a scheduled time; no delay means the
/// schedule holds.
fn convert_stop_time(
    scheduled: Option<&str>,
    delay: Option<&str>,
) -> Result<Option<StopTime>, Error> {
    let Some(raw) = scheduled else {
        return Ok(None);
    };

    let scheduled = parse_wall_time(raw)?;
    let actual = match delay {
        Some(raw_delay) => scheduled + Duration::minutes(parse_delay_minutes(raw_delay)?),
        None => scheduled,
    };

    Ok(Some(StopTime { scheduled, actual }))
}

/// The serviceinfo timestamps carry an offset suffix the official
/// clients discard; only the wall-time prefix is meaningful.
fn parse_wall_time(raw: &str) -> Result<NaiveDateTime, Error> {
    let wall = raw
        .get(..19)
        .ok_or_else(|| bad(format!("timestamp too short: {raw:?}")))?;

    NaiveDateTime::parse_from_str(wall, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| bad(format!("timestamp {raw:?}: {e}")))
}

/// Parse a `PT{n}M` duration into whole minutes.
fn parse_delay_minutes(raw: &str) -> Result<i64, Error> {
    raw.strip_prefix("PT")
        .and_then(|rest| rest.strip_suffix('M'))
        .and_then(|minutes| minutes.parse().ok())
        .ok_or_else(|| bad(format!("delay {raw:?} is not a PT..M duration")))
}

fn convert_stop_meta(record: &StopRecord) -> Result<StopMeta, Error> {
    let mut meta = StopMeta::default();

    if let Some(raw) = &record.prognose {
        let count = raw
            .trim()
            .parse()
            .map_err(|_| bad(format!("prognose {raw:?} is not a number")))?;
        meta.expected_passengers = Some(count);
    }

    for measurement in &record.punctuality {
        let value: f64 = measurement
            .value
            .trim()
            .parse()
            .map_err(|_| bad(format!("punctuality {:?} is not a number", measurement.value)))?;

        // Tokens outside the two known moments are ignored; punctuality
        // is decoration, not data anything depends on.
        match measurement.moment.as_str() {
            "aankomst" => meta.arrived_on_time = Some(value),
            "vertrek" => meta.departed_on_time = Some(value),
            _ => {}
        }
    }

    Ok(meta)
}

// --- disruptions ---

/// Merge the planned and current disruption lists. Planned entries come
/// first and win on duplicate ids; current-only entries are appended in
/// their served order.
pub(crate) fn merge_disruptions(
    planned: Vec<DisruptionRecord>,
    current: Vec<DisruptionRecord>,
) -> Vec<DisruptionRecord> {
    let known: HashSet<String> = planned.iter().map(|d| d.id.clone()).collect();

    let mut merged = planned;
    merged.extend(current.into_iter().filter(|d| !known.contains(&d.id)));
    merged
}

pub(crate) fn convert_disruptions(
    records: &[DisruptionRecord],
    stations: &StationDirectory,
) -> Result<Vec<Disruption>, Error> {
    records
        .iter()
        .map(|record| convert_disruption(record, stations))
        .collect()
}

fn convert_disruption(
    record: &DisruptionRecord,
    stations: &StationDirectory,
) -> Result<Disruption, Error> {
    let mut affected = Vec::new();

    for section in &record.trajecten {
        let starts = section
            .begintijd
            .as_deref()
            .map(parse_zoned_time)
            .transpose()?;
        let ends = section
            .eindtijd
            .as_deref()
            .map(parse_zoned_time)
            .transpose()?;

        for code in &section.stations {
            affected.push(AffectedStation {
                station: stations.lookup(code)?,
                starts,
                ends,
            });
        }
    }

    Ok(Disruption {
        id: record.id.clone(),
        title: record.header.clone(),
        cause: record.oorzaak.clone(),
        effect: record.gevolg.clone(),
        stations: affected,
    })
}

// --- route options ---

pub(crate) fn convert_route_options(
    response: &ReisMogelijkheden,
    stations: &StationDirectory,
) -> Result<Vec<RouteOption>, Error> {
    response
        .options
        .iter()
        .map(|record| convert_route_option(record, stations))
        .collect()
}

fn convert_route_option(
    record: &RouteOptionRecord,
    stations: &StationDirectory,
) -> Result<RouteOption, Error> {
    let departure = PlannedTime {
        scheduled: parse_zoned_time(&record.geplande_vertrek_tijd)?,
        actual: parse_zoned_time(&record.actuele_vertrek_tijd)?,
    };
    let arrival = PlannedTime {
        scheduled: parse_zoned_time(&record.geplande_aankomst_tijd)?,
        actual: parse_zoned_time(&record.actuele_aankomst_tijd)?,
    };

    let legs = record
        .legs
        .iter()
        .map(|leg| convert_route_leg(leg, stations))
        .collect::<Result<_, _>>()?;

    Ok(RouteOption {
        transfers: record.aantal_overstappen,
        is_as_scheduled: record.status == STATUS_AS_SCHEDULED,
        departure,
        arrival,
        legs,
    })
}

fn convert_route_leg(record: &LegRecord, stations: &StationDirectory) -> Result<Leg, Error> {
    let exit_side = record
        .uitstap_zijde
        .as_deref()
        .map(parse_exit_side)
        .transpose()?;

    let stops = record
        .stops
        .iter()
        .map(|stop| convert_leg_stop(stop, stations))
        .collect::<Result<_, _>>()?;

    Ok(Leg {
        provider: record.vervoerder.clone(),
        train_id: record.rit_nummer.clone(),
        is_as_scheduled: record.status == STATUS_AS_SCHEDULED,
        final_destination: record.richting.clone(),
        exit_side,
        stops,
    })
}

/// Exit-side tokens are Dutch; anything outside the two known ones is
/// contract drift we want to hear about.
fn parse_exit_side(raw: &str) -> Result<ExitSide, Error> {
    match raw {
        "Links" => Ok(ExitSide::Left),
        "Rechts" => Ok(ExitSide::Right),
        other => Err(bad(format!("unknown exit side {other:?}"))),
    }
}

fn convert_leg_stop(record: &LegStopRecord, stations: &StationDirectory) -> Result<LegStop, Error> {
    Ok(LegStop {
        station: stations.lookup(&record.code)?,
        is_nonstop: record.stop_type != STOP_TYPE_CALLING,
        time: record.tijd.as_deref().map(parse_zoned_time).transpose()?,
        track: record.spoor.as_ref().map(|track| track.value.clone()),
    })
}

// --- departures ---

pub(crate) fn convert_departures(
    response: &ActueleVertrekTijden,
) -> Result<Vec<Departure>, Error> {
    response.departures.iter().map(convert_departure).collect()
}

fn convert_departure(record: &DepartureRecord) -> Result<Departure, Error> {
    Ok(Departure {
        final_destination: record.eind_bestemming.clone(),
        train_id: record.rit_nummer.clone(),
        train_type: record.trein_soort.clone(),
        track: record.vertrek_spoor.value.clone(),
        time: parse_zoned_time(&record.vertrek_tijd)?,
        provider: record.vervoerder.clone(),
    })
}

fn parse_zoned_time(raw: &str) -> Result<DateTime<FixedOffset>, Error> {
    DateTime::parse_from_str(raw, ZONED_TIME_FORMAT)
        .map_err(|e| bad(format!("timestamp {raw:?}: {e}")))
}
