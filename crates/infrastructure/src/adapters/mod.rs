//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod feedback_adapter;

pub use feedback_adapter::FeedbackAdapter;
