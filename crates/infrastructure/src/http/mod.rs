//! HTTP transport

mod transport;

pub use transport::ReqwestTransport;
