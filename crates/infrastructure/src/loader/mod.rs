//! Named module registry
//!
//! Components register themselves under a name; consumers await a name until
//! it shows up or their timeout elapses.

mod registry;

pub use registry::{LoadError, ModuleRegistry};
