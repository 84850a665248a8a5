//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod feedback_port;
mod fetch_port;
mod http_transport_port;
mod storage_port;

pub use feedback_port::{FeedbackPort, SubmitError, TokenRequestError};
#[cfg(test)]
pub use feedback_port::MockFeedbackPort;
pub use fetch_port::{FetchError, FetchPort, Payload};
#[cfg(test)]
pub use fetch_port::MockFetchPort;
pub use http_transport_port::{HttpReply, HttpTransportPort};
#[cfg(test)]
pub use http_transport_port::MockHttpTransportPort;
pub use storage_port::{KeyValueStorePort, StorageKey};
#[cfg(test)]
pub use storage_port::MockKeyValueStorePort;
