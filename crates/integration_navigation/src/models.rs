//! Backend response and request models
//!
//! Field names follow the JSON the backend produces (snake_case).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use domain::{Coordinate, FloorOverlay};
use serde::{Deserialize, Serialize};

/// Details of a single location (`GET /api/locations/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub type_common_name: String,
    pub name: String,
    /// Ancestor ids, root first
    #[serde(default)]
    pub parents: Vec<String>,
    /// Ancestor display names, aligned with `parents`
    #[serde(default)]
    pub parent_names: Vec<String>,
    pub coords: LocationCoords,
    #[serde(default)]
    pub maps: LocationMaps,
    /// Free-form properties (computed props, links, comments)
    #[serde(default)]
    pub props: serde_json::Value,
    /// Canonical URL the frontend should redirect to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl LocationDetails {
    /// Floor overlays available for this location, in backend order
    #[must_use]
    pub fn floor_overlays(&self) -> &[FloorOverlay] {
        self.maps
            .overlays
            .as_ref()
            .map_or(&[], |overlays| overlays.available.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCoords {
    pub lat: f64,
    pub lon: f64,
    /// Where the coordinate comes from (`navigatum`, `roomfinder`, `inferred`)
    #[serde(default)]
    pub source: String,
}

impl LocationCoords {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.lat, self.lon)
    }
}

/// Map presentations available for a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMaps {
    #[serde(default)]
    pub default: MapKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlays: Option<OverlayMaps>,
}

/// Which map is shown first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKind {
    #[default]
    Interactive,
    Roomfinder,
}

/// Floor overlays of a building
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayMaps {
    /// Overlay shown initially; `None` means no overlay
    #[serde(default)]
    pub default: Option<i64>,
    #[serde(default)]
    pub available: Vec<FloorOverlay>,
}

/// Public transport near a location (`GET /api/locations/{id}/nearby`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearbyResponse {
    #[serde(default)]
    pub public_transport: Vec<TransportStation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportStation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
}

/// Response of `POST /api/feedback/get_token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Server-side issuance time (seconds since epoch)
    #[serde(default)]
    pub created_at: i64,
}

/// A feedback message accepted by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmitted {
    /// URL of the issue created for the message
    pub issue_url: String,
}

/// Body of `POST /api/calendar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub ids: Vec<String>,
    pub start_after: DateTime<Utc>,
    pub end_before: DateTime<Utc>,
}

/// Calendar entries keyed by location id
pub type CalendarResponse = BTreeMap<String, LocationEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    pub location: CalendarLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub entry_type: String,
    #[serde(default)]
    pub detailed_entry_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarLocation {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_calendar_scrape_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_url: Option<String>,
    #[serde(default)]
    pub type_common_name: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
}
