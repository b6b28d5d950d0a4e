//! HTTP client construction and transport-level failures.

pub mod http;

pub use http::{default_client, TransportError};
