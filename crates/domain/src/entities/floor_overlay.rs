//! Floor overlay entity

use serde::{Deserialize, Serialize};

/// An image layer for one building floor, georeferenced by its four corners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorOverlay {
    pub id: i64,
    /// Short floor label, e.g. "EG" or "1"
    pub floor: String,
    /// Human-readable floor name
    pub name: String,
    /// Image path relative to the CDN root
    pub file: String,
    /// Corner positions as `[lon, lat]`, clockwise from top-left
    pub coordinates: [[f64; 2]; 4],
}
