//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod coordinate;

pub use bounding_box::BoundingBox;
pub use coordinate::Coordinate;
