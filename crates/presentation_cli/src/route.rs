//! Itinerary inspection for the `route` command

use anyhow::Context;
use domain::BoundingBox;
use integration_transit::{
    Itinerary, ModeStyle, PlanResponse, bounds, extract_stops_with_context,
};
use serde::Serialize;

/// Everything the map layer would draw for one itinerary
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub summary: String,
    pub bounds: Option<BoundingBox>,
    pub legs: Vec<LegReport>,
    pub stops: Vec<StopReport>,
}

#[derive(Debug, Serialize)]
pub struct LegReport {
    pub mode: String,
    pub from: String,
    pub to: String,
    /// Decoded geometry points; zero when the geometry was unusable
    pub points: usize,
    pub style: ModeStyle,
}

#[derive(Debug, Serialize)]
pub struct StopReport {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub modes: Vec<String>,
    pub important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_change: Option<String>,
}

/// Parse either a full plan response or a single itinerary
pub fn parse_itineraries(raw: &str) -> anyhow::Result<Vec<Itinerary>> {
    let value: serde_json::Value = serde_json::from_str(raw).context("route file is not JSON")?;

    if value.get("legs").is_some() {
        let itinerary: Itinerary =
            serde_json::from_value(value).context("route file is not an itinerary")?;
        return Ok(vec![itinerary]);
    }

    let plan: PlanResponse =
        serde_json::from_value(value).context("route file is not a plan response")?;
    Ok(plan.itineraries.into_iter().chain(plan.direct).collect())
}

#[must_use]
pub fn report(itinerary: &Itinerary) -> RouteReport {
    let legs = itinerary
        .legs
        .iter()
        .map(|leg| LegReport {
            mode: leg.mode.to_string(),
            from: leg.from.name.clone(),
            to: leg.to.name.clone(),
            points: leg.coordinates().len(),
            style: leg.style(),
        })
        .collect();

    let stops = extract_stops_with_context(itinerary)
        .into_iter()
        .map(|stop| StopReport {
            name: stop.place.name.clone(),
            lat: stop.place.lat,
            lon: stop.place.lon,
            modes: stop.transport_modes.iter().map(ToString::to_string).collect(),
            important: stop.important,
            platform_change: stop.platform_change,
        })
        .collect();

    RouteReport {
        summary: itinerary.format_summary(),
        bounds: bounds(itinerary),
        legs,
        stops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITINERARY: &str = r#"{
        "duration": 900,
        "legs": [
            {
                "mode": "BUS",
                "from": { "name": "Garching", "lat": 48.2494, "lon": 11.6527, "track": "2" },
                "to": { "name": "Forschungszentrum", "lat": 48.2650, "lon": 11.6713 },
                "routeShortName": "690",
                "routeColor": "00586A",
                "legGeometry": { "points": "not a polyline!", "precision": 6, "length": 2 }
            }
        ]
    }"#;

    #[test]
    fn single_itinerary_is_accepted() {
        let itineraries = parse_itineraries(ITINERARY).unwrap();
        assert_eq!(itineraries.len(), 1);
    }

    #[test]
    fn plan_response_is_flattened() {
        let raw = format!(r#"{{"itineraries": [{ITINERARY}], "direct": [{ITINERARY}]}}"#);
        assert_eq!(parse_itineraries(&raw).unwrap().len(), 2);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_itineraries("[1, 2").is_err());
    }

    #[test]
    fn report_survives_bad_geometry() {
        let itinerary = &parse_itineraries(ITINERARY).unwrap()[0];
        let report = report(itinerary);
        assert_eq!(report.legs[0].points, 0);
        assert_eq!(report.legs[0].style.color, "#00586a");
        assert_eq!(report.stops.len(), 2);
        assert!(report.stops.iter().all(|s| s.important));
        assert!(report.bounds.is_some());
        assert!(report.summary.contains("690"));
    }
}
