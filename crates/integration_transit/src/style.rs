//! Line styles per transport mode

use serde::Serialize;

use crate::models::{Leg, Mode};

/// Stroke style used to draw a leg on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStyle {
    /// CSS colour
    pub color: String,
    /// Stroke width in pixels
    pub weight: u32,
    pub opacity: f64,
    /// SVG dash pattern, solid when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<&'static str>,
}

struct StyleEntry {
    color: &'static str,
    weight: u32,
    opacity: f64,
    dash_array: Option<&'static str>,
}

const fn entry(
    color: &'static str,
    weight: u32,
    opacity: f64,
    dash_array: Option<&'static str>,
) -> StyleEntry {
    StyleEntry {
        color,
        weight,
        opacity,
        dash_array,
    }
}

const FALLBACK: StyleEntry = entry("#6b7280", 5, 0.8, None);

const STYLES: &[(Mode, StyleEntry)] = &[
    (Mode::Walk, entry("#6b7280", 4, 0.8, Some("5, 10"))),
    (Mode::Bike, entry("#16a34a", 4, 0.8, Some("10, 5"))),
    (Mode::Rental, entry("#16a34a", 4, 0.8, Some("10, 5"))),
    (Mode::Car, entry("#374151", 5, 0.8, None)),
    (Mode::Bus, entry("#00586a", 5, 0.9, None)),
    (Mode::Coach, entry("#b45309", 5, 0.9, None)),
    (Mode::Tram, entry("#d82020", 5, 0.9, None)),
    (Mode::Subway, entry("#0065ae", 6, 0.9, None)),
    (Mode::Metro, entry("#408335", 6, 0.9, None)),
    (Mode::Suburban, entry("#408335", 6, 0.9, None)),
    (Mode::Rail, entry("#1f2937", 6, 0.9, None)),
    (Mode::RegionalRail, entry("#1f2937", 6, 0.9, None)),
    (Mode::RegionalFastRail, entry("#1f2937", 6, 0.9, None)),
    (Mode::HighspeedRail, entry("#ec0016", 6, 0.9, None)),
    (Mode::LongDistance, entry("#ec0016", 6, 0.9, None)),
    (Mode::NightRail, entry("#312e81", 6, 0.9, None)),
    (Mode::Ferry, entry("#0ea5e9", 5, 0.9, Some("2, 6"))),
];

/// Look up the line style of a transport mode
///
/// Modes without a dedicated entry get a neutral solid grey line.
#[must_use]
pub fn get_transit_mode_style(mode: Mode) -> ModeStyle {
    let style = STYLES
        .iter()
        .find(|(m, _)| *m == mode)
        .map_or(&FALLBACK, |(_, style)| style);

    ModeStyle {
        color: style.color.to_string(),
        weight: style.weight,
        opacity: style.opacity,
        dash_array: style.dash_array,
    }
}

impl Leg {
    /// Style for this leg, preferring the route's own colour when provided
    #[must_use]
    pub fn style(&self) -> ModeStyle {
        let mut style = get_transit_mode_style(self.mode);
        if let Some(color) = self
            .route_color
            .as_deref()
            .filter(|c| c.len() == 6 && c.chars().all(|ch| ch.is_ascii_hexdigit()))
        {
            style.color = format!("#{}", color.to_ascii_lowercase());
        }
        style
    }
}
