//! Logging setup for the binaries

mod subscriber;

pub use subscriber::{TelemetryError, init_tracing};
