//! Domain layer for Wayfinder
//!
//! Contains the core vocabulary of the campus wayfinding client: coordinates,
//! search sections and facets, feedback tokens and floor overlays.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
