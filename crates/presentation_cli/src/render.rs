//! Plain-text rendering of search and location results

use std::fmt::Write;

use application::{ControlLayout, FloorControl};
use domain::Facet;

/// Turn rendered result markup into terminal text
///
/// Highlights become `*...*`; entities are decoded with `&amp;` last so
/// `&amp;lt;` stays a literal `&lt;`.
#[must_use]
pub fn terminal_text(html: &str) -> String {
    html.replace("<em>", "*")
        .replace("</em>", "*")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Render facets the way the result list shows them
#[must_use]
pub fn facets_text(facets: &[Facet]) -> String {
    if facets.is_empty() {
        return "No results.\n".to_string();
    }

    let mut out = String::new();
    for facet in facets {
        let _ = writeln!(
            out,
            "{} (~{} hits)",
            facet.title(),
            facet.estimated_total_hits()
        );
        for entry in facet.visible_entries() {
            let _ = write!(out, "  {:<20} {}", entry.id, terminal_text(&entry.name));
            if !entry.subtext.is_empty() {
                let _ = write!(out, "  [{}]", terminal_text(&entry.subtext));
            }
            if let Some(bold) = &entry.subtext_bold {
                let _ = write!(out, " {}", terminal_text(bold));
            }
            out.push('\n');
        }
        let hidden = facet.entries().len() - facet.visible_entries().len();
        if hidden > 0 {
            let _ = writeln!(out, "  ... {hidden} more");
        }
    }
    out
}

/// Describe a floor control: layout plus one line per button
#[must_use]
pub fn floors_text(control: &FloorControl) -> String {
    if control.buttons().is_empty() {
        return "No floor overlays.\n".to_string();
    }

    let layout = match control.layout() {
        ControlLayout::Reduced => "reduced",
        ControlLayout::Collapsed { horizontal: true } => "collapsed, horizontal",
        ControlLayout::Collapsed { horizontal: false } => "collapsed, vertical",
    };
    let mut out = format!(
        "Floors ({layout}, {:.0}px):\n",
        control.required_height()
    );
    let selected = control.selected();
    for button in control.buttons() {
        let marker = if selected == Some(button) { '>' } else { ' ' };
        let _ = writeln!(out, " {marker} {}", button.label());
    }
    out
}
