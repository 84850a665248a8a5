//! Search results and their UI projection
//!
//! The backend answers a search with an ordered list of sections, each tagged
//! with a facet kind. [`Facet`] is the shape the result list is rendered from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Control byte the backend inserts before a highlighted span
pub const HIGHLIGHT_BEGIN: char = '\u{19}';
/// Control byte the backend inserts after a highlighted span
pub const HIGHLIGHT_END: char = '\u{17}';

/// Parameters of an autocomplete/search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit_buildings: u32,
    pub limit_rooms: u32,
    pub limit_all: u32,
}

impl SearchQuery {
    /// Query with the limits used by the autocomplete dropdown
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit_buildings: 5,
            limit_rooms: 10,
            limit_all: 10,
        }
    }

    /// Query with the larger limits of the full results page
    pub fn full_page(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit_buildings: 10,
            limit_rooms: 30,
            limit_all: 30,
        }
    }

    /// Whether there is nothing to search for
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.q.trim().is_empty()
    }

    /// Query-string pairs, including the highlight marker bytes
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("limit_buildings", self.limit_buildings.to_string()),
            ("limit_rooms", self.limit_rooms.to_string()),
            ("limit_all", self.limit_all.to_string()),
            ("pre_highlight", HIGHLIGHT_BEGIN.to_string()),
            ("post_highlight", HIGHLIGHT_END.to_string()),
        ]
    }
}

/// Raw search response as returned by `GET /api/search`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Result sections in backend order
    #[serde(default)]
    pub sections: Vec<SearchSection>,
    /// Server-side processing time
    #[serde(default)]
    pub time_ms: u64,
}

/// One section of a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSection {
    /// Facet tag as sent on the wire; unknown tags are tolerated here
    pub facet: String,
    #[serde(default)]
    pub entries: Vec<SearchEntry>,
    #[serde(rename = "estimatedTotalHits", default)]
    pub estimated_total_hits: u64,
    /// How many entries to show before the section is expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_visible: Option<usize>,
}

impl SearchSection {
    /// Typed facet kind, `None` for tags this client does not know
    pub fn kind(&self) -> Option<FacetKind> {
        self.facet.parse().ok()
    }
}

/// A single search hit with highlight markers still embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub subtext: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext_bold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_id: Option<String>,
}

/// Kinds of result groups the client knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Rooms,
    SitesBuildings,
}

impl FacetKind {
    /// Wire tag of this kind
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::SitesBuildings => "sites_buildings",
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rooms" => Ok(Self::Rooms),
            "sites_buildings" => Ok(Self::SitesBuildings),
            other => Err(DomainError::UnknownFacet(other.to_string())),
        }
    }
}

/// A search hit ready for rendering
///
/// Text fields contain escaped HTML with `<em>` highlight markup.
/// `subtext_bold` and `parsed_id` are only populated for rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub subtext: String,
    pub subtext_bold: Option<String>,
    pub parsed_id: Option<String>,
}

/// Room results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsFacet {
    pub title: String,
    pub estimated_total_hits: u64,
    pub entries: Vec<FacetEntry>,
}

/// Site and building results, collapsed to `n_visible` entries by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitesBuildingsFacet {
    pub title: String,
    pub estimated_total_hits: u64,
    pub entries: Vec<FacetEntry>,
    pub expanded: bool,
    pub n_visible: usize,
}

impl SitesBuildingsFacet {
    /// Entries currently shown: the first `n_visible` until expanded
    #[must_use]
    pub fn visible_entries(&self) -> &[FacetEntry] {
        if self.expanded {
            &self.entries
        } else {
            &self.entries[..self.n_visible.min(self.entries.len())]
        }
    }

    /// Whether expanding would reveal more entries
    #[must_use]
    pub fn has_hidden_entries(&self) -> bool {
        !self.expanded && self.n_visible < self.entries.len()
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// UI projection of a search section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "facet", rename_all = "snake_case")]
pub enum Facet {
    Rooms(RoomsFacet),
    SitesBuildings(SitesBuildingsFacet),
}

impl Facet {
    #[must_use]
    pub const fn kind(&self) -> FacetKind {
        match self {
            Self::Rooms(_) => FacetKind::Rooms,
            Self::SitesBuildings(_) => FacetKind::SitesBuildings,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Rooms(facet) => &facet.title,
            Self::SitesBuildings(facet) => &facet.title,
        }
    }

    #[must_use]
    pub const fn estimated_total_hits(&self) -> u64 {
        match self {
            Self::Rooms(facet) => facet.estimated_total_hits,
            Self::SitesBuildings(facet) => facet.estimated_total_hits,
        }
    }

    /// All entries regardless of expansion state
    #[must_use]
    pub fn entries(&self) -> &[FacetEntry] {
        match self {
            Self::Rooms(facet) => &facet.entries,
            Self::SitesBuildings(facet) => &facet.entries,
        }
    }

    /// Entries that are rendered right now
    #[must_use]
    pub fn visible_entries(&self) -> &[FacetEntry] {
        match self {
            Self::Rooms(facet) => &facet.entries,
            Self::SitesBuildings(facet) => facet.visible_entries(),
        }
    }
}
