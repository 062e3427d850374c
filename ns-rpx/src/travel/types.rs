//! Raw response shapes of the live-travel endpoints.
//!
//! The serviceinfo, planner and departures endpoints speak XML with
//! attribute fields (`@type`) and element text (`$text`); the disruption
//! endpoint speaks JSON. Field names are the upstream's Dutch ones; the
//! conversion layer maps them away.

use serde::Deserialize;

// --- serviceinfo (live train progress, XML) ---

/// Root of the serviceinfo response.
#[derive(Debug, Deserialize)]
pub struct ServiceInfoList {
    #[serde(rename = "ServiceInfo")]
    pub service_info: ServiceInfo,
}

/// Progress data for one train.
#[derive(Debug, Deserialize)]
pub struct ServiceInfo {
    /// Transport mode code ("IC", "SPR", ...).
    #[serde(rename = "TransportModeCode")]
    pub transport_mode_code: String,

    #[serde(rename = "StopList")]
    pub stop_list: StopList,
}

#[derive(Debug, Deserialize)]
pub struct StopList {
    #[serde(rename = "Stop", default)]
    pub stops: Vec<StopRecord>,
}

/// One stop of a live train.
///
/// Times are ISO stamps, delays are `PT{minutes}M` durations, and
/// `punctualiteit` appears zero, one or two times depending on which
/// measurements exist for the stop.
#[derive(Debug, Deserialize)]
pub struct StopRecord {
    #[serde(rename = "StopCode")]
    pub stop_code: String,

    #[serde(rename = "Arrival")]
    pub arrival: Option<String>,

    #[serde(rename = "ArrivalTimeDelay")]
    pub arrival_time_delay: Option<String>,

    #[serde(rename = "Departure")]
    pub departure: Option<String>,

    #[serde(rename = "DepartureTimeDelay")]
    pub departure_time_delay: Option<String>,

    /// Expected passenger count.
    #[serde(rename = "prognose")]
    pub prognose: Option<String>,

    #[serde(rename = "punctualiteit", default)]
    pub punctuality: Vec<PunctualityRecord>,
}

/// One punctuality measurement: a percentage tagged with the moment it
/// applies to (`aankomst` or `vertrek`).
#[derive(Debug, Deserialize)]
pub struct PunctualityRecord {
    #[serde(rename = "@moment")]
    pub moment: String,

    #[serde(rename = "$text")]
    pub value: String,
}

// --- avt (live departures, XML) ---

/// Root of the live-departures response.
#[derive(Debug, Deserialize)]
pub struct ActueleVertrekTijden {
    #[serde(rename = "VertrekkendeTrein", default)]
    pub departures: Vec<DepartureRecord>,
}

/// One departing train.
#[derive(Debug, Deserialize)]
pub struct DepartureRecord {
    #[serde(rename = "RitNummer")]
    pub rit_nummer: String,

    #[serde(rename = "VertrekTijd")]
    pub vertrek_tijd: String,

    #[serde(rename = "EindBestemming")]
    pub eind_bestemming: String,

    #[serde(rename = "TreinSoort")]
    pub trein_soort: String,

    #[serde(rename = "Vervoerder")]
    pub vervoerder: String,

    #[serde(rename = "VertrekSpoor")]
    pub vertrek_spoor: TrackRecord,
}

/// A track element: text content plus a changed-track flag attribute.
#[derive(Debug, Deserialize)]
pub struct TrackRecord {
    #[serde(rename = "@wijziging")]
    pub wijziging: Option<String>,

    #[serde(rename = "$text")]
    pub value: String,
}

// --- planner (route options, XML) ---

/// Root of the route-planner response.
#[derive(Debug, Deserialize)]
pub struct ReisMogelijkheden {
    #[serde(rename = "ReisMogelijkheid", default)]
    pub options: Vec<RouteOptionRecord>,
}

/// One journey option.
#[derive(Debug, Deserialize)]
pub struct RouteOptionRecord {
    #[serde(rename = "AantalOverstappen")]
    pub aantal_overstappen: u32,

    /// "AS_SCHEDULED" when nothing deviates.
    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "GeplandeVertrekTijd")]
    pub geplande_vertrek_tijd: String,

    #[serde(rename = "ActueleVertrekTijd")]
    pub actuele_vertrek_tijd: String,

    #[serde(rename = "GeplandeAankomstTijd")]
    pub geplande_aankomst_tijd: String,

    #[serde(rename = "ActueleAankomstTijd")]
    pub actuele_aankomst_tijd: String,

    #[serde(rename = "ReisDeel", default)]
    pub legs: Vec<LegRecord>,
}

/// One vehicle of a journey option.
#[derive(Debug, Deserialize)]
pub struct LegRecord {
    #[serde(rename = "@reisSoort")]
    pub reis_soort: Option<String>,

    #[serde(rename = "Vervoerder")]
    pub vervoerder: String,

    #[serde(rename = "RitNummer")]
    pub rit_nummer: String,

    #[serde(rename = "Status")]
    pub status: String,

    /// Direction sign text, usually the final destination.
    #[serde(rename = "Richting")]
    pub richting: Option<String>,

    /// "Links" or "Rechts".
    #[serde(rename = "UitstapZijde")]
    pub uitstap_zijde: Option<String>,

    #[serde(rename = "ReisStop", default)]
    pub stops: Vec<LegStopRecord>,
}

/// One stop inside a leg.
#[derive(Debug, Deserialize)]
pub struct LegStopRecord {
    /// "STOP" when the train calls here; passage tokens otherwise.
    #[serde(rename = "@type")]
    pub stop_type: String,

    #[serde(rename = "Code")]
    pub code: String,

    #[serde(rename = "Naam")]
    pub naam: Option<String>,

    #[serde(rename = "Tijd")]
    pub tijd: Option<String>,

    #[serde(rename = "Spoor")]
    pub spoor: Option<TrackRecord>,
}

// --- verstoringen (disruptions, JSON) ---

/// Wrapper both disruption endpoints share.
#[derive(Debug, Deserialize)]
pub struct DisruptionsResponse {
    pub payload: Vec<DisruptionRecord>,
}

/// One disruption, Dutch keys as served.
#[derive(Debug, Clone, Deserialize)]
pub struct DisruptionRecord {
    pub id: String,

    /// Headline.
    pub header: String,

    /// Cause description.
    pub oorzaak: String,

    /// Effect description.
    pub gevolg: String,

    /// Affected stretches of track.
    pub trajecten: Vec<TrackSectionRecord>,
}

/// One affected stretch, listing the station codes it covers.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackSectionRecord {
    pub stations: Vec<String>,

    pub begintijd: Option<String>,
    pub eindtijd: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_service_info() {
        let xml = r#"
            <ServiceInfoList>
                <ServiceInfo>
                    <TransportModeCode>IC</TransportModeCode>
                    <StopList>
                        <Stop>
                            <StopCode>GVC</StopCode>
                            <Departure>2017-11-05T12:33:00+0100</Departure>
                            <punctualiteit moment="vertrek">98.5</punctualiteit>
                        </Stop>
                        <Stop>
                            <StopCode>LAA</StopCode>
                        </Stop>
                        <Stop>
                            <StopCode>ASD</StopCode>
                            <Arrival>2017-11-05T13:20:00+0100</Arrival>
                            <ArrivalTimeDelay>PT5M</ArrivalTimeDelay>
                            <prognose>412</prognose>
                            <punctualiteit moment="aankomst">91.0</punctualiteit>
                            <punctualiteit moment="vertrek">93.5</punctualiteit>
                        </Stop>
                    </StopList>
                </ServiceInfo>
            </ServiceInfoList>"#;

        let parsed: ServiceInfoList = quick_xml::de::from_str(xml).unwrap();
        let info = parsed.service_info;
        assert_eq!(info.transport_mode_code, "IC");
        assert_eq!(info.stop_list.stops.len(), 3);

        let first = &info.stop_list.stops[0];
        assert_eq!(first.stop_code, "GVC");
        assert!(first.arrival.is_none());
        assert_eq!(first.punctuality.len(), 1);
        assert_eq!(first.punctuality[0].moment, "vertrek");
        assert_eq!(first.punctuality[0].value, "98.5");

        // A passage has no timing children at all.
        let passage = &info.stop_list.stops[1];
        assert!(passage.arrival.is_none() && passage.departure.is_none());
        assert!(passage.punctuality.is_empty());

        let last = &info.stop_list.stops[2];
        assert_eq!(last.arrival_time_delay.as_deref(), Some("PT5M"));
        assert_eq!(last.prognose.as_deref(), Some("412"));
        assert_eq!(last.punctuality.len(), 2);
    }

    #[test]
    fn deserialize_departures() {
        let xml = r#"
            <ActueleVertrekTijden>
                <VertrekkendeTrein>
                    <RitNummer>1234</RitNummer>
                    <VertrekTijd>2017-11-05T12:48:00+0100</VertrekTijd>
                    <EindBestemming>Rotterdam Centraal</EindBestemming>
                    <TreinSoort>Intercity</TreinSoort>
                    <Vervoerder>NS</Vervoerder>
                    <VertrekSpoor wijziging="false">9</VertrekSpoor>
                </VertrekkendeTrein>
                <VertrekkendeTrein>
                    <RitNummer>5678</RitNummer>
                    <VertrekTijd>2017-11-05T12:51:00+0100</VertrekTijd>
                    <EindBestemming>Utrecht Centraal</EindBestemming>
                    <TreinSoort>Sprinter</TreinSoort>
                    <Vervoerder>NS</Vervoerder>
                    <VertrekSpoor wijziging="true">4a</VertrekSpoor>
                </VertrekkendeTrein>
            </ActueleVertrekTijden>"#;

        let parsed: ActueleVertrekTijden = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.departures.len(), 2);

        let first = &parsed.departures[0];
        assert_eq!(first.rit_nummer, "1234");
        assert_eq!(first.eind_bestemming, "Rotterdam Centraal");
        assert_eq!(first.vertrek_spoor.value, "9");
        assert_eq!(first.vertrek_spoor.wijziging.as_deref(), Some("false"));

        assert_eq!(parsed.departures[1].vertrek_spoor.value, "4a");
    }

    #[test]
    fn deserialize_route_options() {
        let xml = r#"
            <ReisMogelijkheden>
                <ReisMogelijkheid>
                    <AantalOverstappen>1</AantalOverstappen>
                    <GeplandeVertrekTijd>2017-11-05T12:33:00+0100</GeplandeVertrekTijd>
                    <ActueleVertrekTijd>2017-11-05T12:33:00+0100</ActueleVertrekTijd>
                    <GeplandeAankomstTijd>2017-11-05T13:32:00+0100</GeplandeAankomstTijd>
                    <ActueleAankomstTijd>2017-11-05T13:38:00+0100</ActueleAankomstTijd>
                    <Status>DELAYED</Status>
                    <ReisDeel reisSoort="TRAIN">
                        <Vervoerder>NS</Vervoerder>
                        <RitNummer>2246</RitNummer>
                        <Status>AS_SCHEDULED</Status>
                        <Richting>Amsterdam Centraal</Richting>
                        <UitstapZijde>Rechts</UitstapZijde>
                        <ReisStop type="STOP">
                            <Code>GVC</Code>
                            <Naam>Den Haag Centraal</Naam>
                            <Tijd>2017-11-05T12:33:00+0100</Tijd>
                            <Spoor wijziging="false">10</Spoor>
                        </ReisStop>
                        <ReisStop type="PASSING">
                            <Code>LAA</Code>
                            <Naam>Den Haag Laan v NOI</Naam>
                        </ReisStop>
                    </ReisDeel>
                </ReisMogelijkheid>
            </ReisMogelijkheden>"#;

        let parsed: ReisMogelijkheden = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.options.len(), 1);

        let option = &parsed.options[0];
        assert_eq!(option.aantal_overstappen, 1);
        assert_eq!(option.status, "DELAYED");
        assert_eq!(option.legs.len(), 1);

        let leg = &option.legs[0];
        assert_eq!(leg.reis_soort.as_deref(), Some("TRAIN"));
        assert_eq!(leg.rit_nummer, "2246");
        assert_eq!(leg.uitstap_zijde.as_deref(), Some("Rechts"));
        assert_eq!(leg.stops.len(), 2);

        assert_eq!(leg.stops[0].stop_type, "STOP");
        assert_eq!(leg.stops[0].spoor.as_ref().unwrap().value, "10");
        assert_eq!(leg.stops[1].stop_type, "PASSING");
        assert!(leg.stops[1].tijd.is_none());
    }

    #[test]
    fn deserialize_disruptions() {
        let json = r#"{
            "payload": [
                {
                    "id": "prio-13345",
                    "header": "Geen treinen tussen Utrecht en Woerden",
                    "oorzaak": "defecte bovenleiding",
                    "gevolg": "geen treinverkeer mogelijk",
                    "trajecten": [
                        {
                            "stations": ["UT", "WD"],
                            "begintijd": "2017-11-05T12:00:00+0100",
                            "eindtijd": "2017-11-05T18:00:00+0100"
                        }
                    ]
                }
            ]
        }"#;

        let parsed: DisruptionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.payload.len(), 1);

        let disruption = &parsed.payload[0];
        assert_eq!(disruption.id, "prio-13345");
        assert_eq!(disruption.oorzaak, "defecte bovenleiding");
        assert_eq!(disruption.trajecten[0].stations, vec!["UT", "WD"]);
        assert!(disruption.trajecten[0].eindtijd.is_some());
    }
}
