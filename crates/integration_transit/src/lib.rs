//! Transit itinerary utilities for Wayfinder
//!
//! Works on itineraries shaped like the [MOTIS](https://github.com/motis-project/motis)
//! routing API: an itinerary is an ordered list of legs, each with a transport
//! mode, a polyline-encoded geometry and its boarding/alighting places.
//!
//! # Architecture
//!
//! - [`geometry`] decodes leg geometries and computes bounding boxes.
//!   Malformed geometry degrades to an empty path, it never aborts rendering.
//! - [`stops`] collapses the places touched by an itinerary into one marker per
//!   position, annotated with the modes serving it and transfer information.
//! - [`style`] maps transport modes to line styles for the map layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{Itinerary, bounds, extract_stops_with_context};
//!
//! let itinerary: Itinerary = serde_json::from_str(body)?;
//! let viewport = bounds(&itinerary);
//! let markers = extract_stops_with_context(&itinerary);
//! ```

pub mod geometry;
mod error;
mod models;
pub mod stops;
pub mod style;

pub use error::TransitError;
pub use geometry::{GEOMETRY_PRECISION, MAX_PRECISION, bounds, decode, decode_with_precision, try_decode};
pub use models::{EncodedPolyline, Itinerary, Leg, Mode, Place, PlanResponse};
pub use stops::{StopWithContext, extract_stops_with_context};
pub use style::{ModeStyle, get_transit_mode_style};
