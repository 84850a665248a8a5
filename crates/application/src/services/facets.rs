//! Search facet extraction
//!
//! Turns the backend's search sections into render-ready facets. Text coming
//! from the backend is untrusted: it is HTML-escaped first and only then are
//! the highlight marker bytes replaced with `<em>` markup.

use domain::{
    Facet, FacetEntry, FacetKind, HIGHLIGHT_BEGIN, HIGHLIGHT_END, RoomsFacet, SearchEntry,
    SearchResponse, SitesBuildingsFacet,
};
use tracing::debug;

/// Escape text the way an element's text content reads back as markup
///
/// Quotes are left alone; only `&`, `<`, `>` and no-break spaces change.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace highlight markers with `<em>`/`</em>`
///
/// Expects already escaped text; see [`render_highlighted`].
#[must_use]
pub fn highlight(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            HIGHLIGHT_BEGIN => out.push_str("<em>"),
            HIGHLIGHT_END => out.push_str("</em>"),
            other => out.push(other),
        }
    }
    out
}

/// Escape, then turn markers into emphasis
#[must_use]
pub fn render_highlighted(text: &str) -> String {
    highlight(&escape_html(text))
}

fn room_entry(entry: &SearchEntry) -> FacetEntry {
    FacetEntry {
        id: entry.id.clone(),
        name: render_highlighted(&entry.name),
        entry_type: entry.entry_type.clone(),
        subtext: entry.subtext.clone(),
        subtext_bold: entry.subtext_bold.as_deref().map(render_highlighted),
        parsed_id: entry.parsed_id.as_deref().map(render_highlighted),
    }
}

fn site_entry(entry: &SearchEntry) -> FacetEntry {
    FacetEntry {
        id: entry.id.clone(),
        name: render_highlighted(&entry.name),
        entry_type: entry.entry_type.clone(),
        subtext: entry.subtext.clone(),
        subtext_bold: None,
        parsed_id: None,
    }
}

/// Project a search response onto facets, keeping section order
///
/// Sections with a facet tag this client does not know are dropped.
#[must_use]
pub fn extract_facets(
    response: &SearchResponse,
    room_title: &str,
    building_title: &str,
) -> Vec<Facet> {
    response
        .sections
        .iter()
        .filter_map(|section| {
            let Some(kind) = section.kind() else {
                debug!(facet = %section.facet, "Skipping unknown search facet");
                return None;
            };

            Some(match kind {
                FacetKind::Rooms => Facet::Rooms(RoomsFacet {
                    title: room_title.to_string(),
                    estimated_total_hits: section.estimated_total_hits,
                    entries: section.entries.iter().map(room_entry).collect(),
                }),
                FacetKind::SitesBuildings => Facet::SitesBuildings(SitesBuildingsFacet {
                    title: building_title.to_string(),
                    estimated_total_hits: section.estimated_total_hits,
                    entries: section.entries.iter().map(site_entry).collect(),
                    expanded: false,
                    n_visible: section.n_visible.unwrap_or(section.entries.len()),
                }),
            })
        })
        .collect()
}
