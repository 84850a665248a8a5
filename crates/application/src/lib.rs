//! Application layer - Use cases and orchestration
//!
//! Contains the client-side behavior of the wayfinding frontend that does not
//! depend on rendering: facet extraction, the feedback-token lifecycle, the
//! floor-overlay control, page state, preferences and capability detection.
//! Ports define what the infrastructure layer has to provide.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
