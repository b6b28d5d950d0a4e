use crate::context::ContextError;
use crate::{Error, Result};
use std::time::Duration;

/// Build the `reqwest::Client` used when the caller does not bring one.
///
/// No overall timeout is set unless asked for; call lifetime belongs to the
/// caller's [`CallContext`](crate::CallContext).
pub fn default_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("whisper-client/", env!("CARGO_PKG_VERSION")));
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Context(#[from] ContextError),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout(),
            TransportError::Context(e) => *e == ContextError::DeadlineExceeded,
        }
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_connect())
    }
}
