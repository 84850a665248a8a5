//! Key-value storage for client state
//!
//! - `InMemoryStore`: process-local, used by tests and one-shot commands
//! - `JsonFileStore`: a single JSON object on disk, written through on change

mod error;
mod file_store;
mod memory_store;

pub use error::StorageError;
pub use file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
