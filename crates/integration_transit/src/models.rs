//! Itinerary data models
//!
//! Typed representations of routing results as returned by a MOTIS-style
//! `plan` endpoint. Field names follow the wire format (camelCase).

use std::fmt;

use chrono::{DateTime, Utc};
use domain::Coordinate;
use serde::{Deserialize, Serialize};

use crate::geometry::{GEOMETRY_PRECISION, decode_with_precision};

/// Result of a routing request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Public transport itineraries
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    /// Direct (walk/bike/car only) itineraries
    #[serde(default)]
    pub direct: Vec<Itinerary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_cursor: Option<String>,
}

/// A complete journey from origin to destination, consisting of one or more legs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Total duration in seconds
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Transfer count as reported by the router
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfers: Option<u32>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl Itinerary {
    /// Number of transfers between transit legs
    ///
    /// Prefers the router's own count and falls back to counting legs.
    #[must_use]
    pub fn transfer_count(&self) -> u32 {
        self.transfers.unwrap_or_else(|| {
            let transit_legs = self.legs.iter().filter(|leg| !leg.is_walking()).count();
            u32::try_from(transit_legs.saturating_sub(1)).unwrap_or(u32::MAX)
        })
    }

    /// Total duration in whole minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> u64 {
        self.duration / 60
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let lines: Vec<&str> = self
            .legs
            .iter()
            .filter(|leg| !leg.is_walking())
            .filter_map(|leg| leg.route_short_name.as_deref())
            .collect();
        let route = if lines.is_empty() {
            String::from("walk")
        } else {
            lines.join(" → ")
        };

        let times = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                format!("{} → {} ", start.format("%H:%M"), end.format("%H:%M"))
            },
            _ => String::new(),
        };

        format!(
            "{times}({}min, {} transfers) {route}",
            self.duration_minutes(),
            self.transfer_count()
        )
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}

/// A single leg (segment) of an itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub mode: Mode,
    pub from: Place,
    pub to: Place,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Encoded path of this leg
    #[serde(default)]
    pub leg_geometry: EncodedPolyline,
    /// Stops passed without boarding or alighting
    #[serde(default)]
    pub intermediate_stops: Vec<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    /// Route colour as hex without the leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    /// Distance in meters (walking legs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Leg {
    /// Whether this is a walking segment
    #[must_use]
    pub const fn is_walking(&self) -> bool {
        matches!(self.mode, Mode::Walk)
    }

    /// Decoded path of this leg; empty when the geometry is malformed
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        decode_with_precision(&self.leg_geometry.points, self.leg_geometry.precision)
    }
}

/// Polyline-encoded geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncodedPolyline {
    #[serde(default)]
    pub points: String,
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Number of encoded points
    #[serde(default)]
    pub length: usize,
}

const fn default_precision() -> u32 {
    GEOMETRY_PRECISION
}

impl Default for EncodedPolyline {
    fn default() -> Self {
        Self {
            points: String::new(),
            precision: GEOMETRY_PRECISION,
            length: 0,
        }
    }
}

/// A place on an itinerary (stop, platform or free coordinate)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Building level, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    /// Actual track/platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Scheduled track/platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<DateTime<Utc>>,
}

impl Place {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.lat, self.lon)
    }
}

/// Transport mode of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Walk,
    Bike,
    Rental,
    Car,
    Bus,
    Coach,
    Tram,
    Subway,
    Metro,
    Ferry,
    Airplane,
    Rail,
    HighspeedRail,
    LongDistance,
    NightRail,
    RegionalFastRail,
    RegionalRail,
    Suburban,
    Funicular,
    AerialLift,
    /// Any mode this client does not distinguish
    #[serde(other)]
    Other,
}

impl Mode {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Bike => "Bike",
            Self::Rental => "Rental",
            Self::Car => "Car",
            Self::Bus => "Bus",
            Self::Coach => "Coach",
            Self::Tram => "Tram",
            Self::Subway => "U-Bahn",
            Self::Metro | Self::Suburban => "S-Bahn",
            Self::Ferry => "Ferry",
            Self::Airplane => "Flight",
            Self::Rail | Self::RegionalFastRail | Self::RegionalRail => "Regional",
            Self::HighspeedRail | Self::LongDistance | Self::NightRail => "Long distance",
            Self::Funicular => "Funicular",
            Self::AerialLift => "Aerial lift",
            Self::Other => "Transit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
