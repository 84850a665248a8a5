//! Stop markers for itinerary rendering
//!
//! Every place an itinerary touches becomes at most one marker per position.
//! Markers remember which transport modes serve them and whether they are
//! journey endpoints or transfer points.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Itinerary, Mode, Place};

/// A place annotated with the context needed to draw its marker
#[derive(Debug, Clone, PartialEq)]
pub struct StopWithContext {
    pub place: Place,
    /// Every transit mode boarding, alighting or passing here
    pub transport_modes: BTreeSet<Mode>,
    /// Journey endpoint or transfer point
    pub important: bool,
    /// Set when a transfer here changes track/platform
    pub platform_change: Option<String>,
}

impl StopWithContext {
    fn new(place: &Place, mode: Mode, important: bool, platform_change: Option<String>) -> Self {
        Self {
            place: place.clone(),
            transport_modes: BTreeSet::from([mode]),
            important,
            platform_change,
        }
    }

    fn merge(&mut self, mode: Mode, important: bool, platform_change: Option<String>) {
        self.transport_modes.insert(mode);
        self.important |= important;
        if self.platform_change.is_none() {
            self.platform_change = platform_change;
        }
    }
}

#[derive(Debug, Default)]
struct StopCollector {
    stops: Vec<StopWithContext>,
    by_position: HashMap<(u64, u64), usize>,
}

impl StopCollector {
    fn add(&mut self, place: &Place, mode: Mode, important: bool, platform_change: Option<String>) {
        let key = place.coordinate().position_key();
        if let Some(&idx) = self.by_position.get(&key) {
            self.stops[idx].merge(mode, important, platform_change);
        } else {
            self.by_position.insert(key, self.stops.len());
            self.stops
                .push(StopWithContext::new(place, mode, important, platform_change));
        }
    }
}

/// Collect the stop markers of an itinerary
///
/// Walks legs in order and skips walking legs. Boarding and alighting places
/// are important; intermediate stops are not. A place at an already-seen
/// position is merged into the existing marker. When the previous transit leg
/// arrived on a different track than the next one departs from, the boarding
/// place carries a platform-change note.
#[must_use]
pub fn extract_stops_with_context(itinerary: &Itinerary) -> Vec<StopWithContext> {
    let mut collector = StopCollector::default();
    let mut arrival_track: Option<&str> = None;

    for leg in itinerary.legs.iter().filter(|leg| !leg.is_walking()) {
        let platform_change = match (arrival_track, leg.from.track.as_deref()) {
            (Some(previous), Some(next)) if previous != next => {
                Some(format!("Platform {previous} → {next}"))
            },
            _ => None,
        };

        collector.add(&leg.from, leg.mode, true, platform_change);
        for stop in &leg.intermediate_stops {
            collector.add(stop, leg.mode, false, None);
        }
        collector.add(&leg.to, leg.mode, true, None);

        arrival_track = leg.to.track.as_deref();
    }

    collector.stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EncodedPolyline, Leg};

    fn place(name: &str, lat: f64, lon: f64, track: Option<&str>) -> Place {
        Place {
            name: name.to_string(),
            stop_id: None,
            lat,
            lon,
            level: None,
            track: track.map(ToString::to_string),
            scheduled_track: None,
            arrival: None,
            departure: None,
        }
    }

    fn leg(mode: Mode, from: Place, to: Place, intermediate: Vec<Place>) -> Leg {
        Leg {
            mode,
            from,
            to,
            duration: 0,
            start_time: None,
            end_time: None,
            leg_geometry: EncodedPolyline::default(),
            intermediate_stops: intermediate,
            route_short_name: None,
            headsign: None,
            route_color: None,
            agency_name: None,
            distance: None,
        }
    }

    fn transfer_itinerary() -> Itinerary {
        Itinerary {
            legs: vec![
                leg(
                    Mode::Walk,
                    place("Start", 48.0, 11.0, None),
                    place("Garching", 48.1, 11.1, Some("1")),
                    vec![],
                ),
                leg(
                    Mode::Subway,
                    place("Garching", 48.1, 11.1, Some("1")),
                    place("Hauptbahnhof", 48.14, 11.56, Some("2")),
                    vec![place("Freimann", 48.19, 11.61, None)],
                ),
                leg(
                    Mode::Suburban,
                    place("Hauptbahnhof", 48.14, 11.56, Some("5")),
                    place("Pasing", 48.15, 11.46, None),
                    vec![],
                ),
                leg(
                    Mode::Walk,
                    place("Pasing", 48.15, 11.46, None),
                    place("Destination", 48.16, 11.45, None),
                    vec![],
                ),
            ],
            ..Itinerary::default()
        }
    }

    #[test]
    fn test_signed_zero_positions_merge() {
        let itinerary = Itinerary {
            legs: vec![
                leg(
                    Mode::Ferry,
                    place("Quay", 0.0, 9.5, None),
                    place("Equator pier", 0.0, -0.0, None),
                    vec![],
                ),
                leg(
                    Mode::Bus,
                    place("Equator pier", -0.0, 0.0, None),
                    place("Terminal", 0.1, 0.1, None),
                    vec![],
                ),
            ],
            ..Itinerary::default()
        };

        let stops = extract_stops_with_context(&itinerary);
        assert_eq!(stops.len(), 3);
        let pier = stops
            .iter()
            .find(|s| s.place.name == "Equator pier")
            .unwrap();
        assert_eq!(pier.transport_modes.len(), 2);
    }

    #[test]
    fn test_walking_legs_are_skipped() {
        let stops = extract_stops_with_context(&transfer_itinerary());
        let names: Vec<&str> = stops.iter().map(|s| s.place.name.as_str()).collect();
        assert_eq!(names, vec!["Garching", "Freimann", "Hauptbahnhof", "Pasing"]);
    }

    #[test]
    fn test_transfer_is_merged_with_union_of_modes() {
        let stops = extract_stops_with_context(&transfer_itinerary());
        let hbf = stops
            .iter()
            .find(|s| s.place.name == "Hauptbahnhof")
            .unwrap();
        assert!(hbf.important);
        assert_eq!(
            hbf.transport_modes,
            BTreeSet::from([Mode::Subway, Mode::Suburban])
        );
        assert_eq!(hbf.platform_change.as_deref(), Some("Platform 2 → 5"));
    }

    #[test]
    fn test_intermediate_stops_are_not_important() {
        let stops = extract_stops_with_context(&transfer_itinerary());
        let freimann = stops.iter().find(|s| s.place.name == "Freimann").unwrap();
        assert!(!freimann.important);
        assert!(freimann.platform_change.is_none());
    }

    #[test]
    fn test_same_track_has_no_platform_change() {
        let mut itinerary = transfer_itinerary();
        itinerary.legs[2].from.track = Some("2".to_string());
        let stops = extract_stops_with_context(&itinerary);
        assert!(stops.iter().all(|s| s.platform_change.is_none()));
    }

    #[test]
    fn test_intermediate_then_endpoint_upgrades_importance() {
        let itinerary = Itinerary {
            legs: vec![
                leg(
                    Mode::Bus,
                    place("A", 1.0, 1.0, None),
                    place("C", 3.0, 3.0, None),
                    vec![place("B", 2.0, 2.0, None)],
                ),
                leg(
                    Mode::Tram,
                    place("B", 2.0, 2.0, None),
                    place("D", 4.0, 4.0, None),
                    vec![],
                ),
            ],
            ..Itinerary::default()
        };
        let stops = extract_stops_with_context(&itinerary);
        assert_eq!(stops.len(), 4);
        let b = stops.iter().find(|s| s.place.name == "B").unwrap();
        assert!(b.important);
        assert_eq!(b.transport_modes, BTreeSet::from([Mode::Bus, Mode::Tram]));
    }

    #[test]
    fn test_empty_itinerary_has_no_stops() {
        assert!(extract_stops_with_context(&Itinerary::default()).is_empty());
    }
}
