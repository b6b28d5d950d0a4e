use crate::context::ContextError;
use crate::transport::TransportError;
use thiserror::Error;

/// Stage of a transcription call that produced an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Assembling the multipart body (file part or a form field).
    Encoding,
    /// Building the outbound HTTP request.
    RequestConstruction,
    /// Sending the request or waiting for response headers.
    Transport,
    /// Draining the response body after headers arrived.
    ResponseRead,
    /// Client construction or configuration loading.
    Configuration,
}

/// Unified error type for the transcription client.
///
/// Each variant identifies the stage that failed and keeps the underlying cause
/// reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not encode multipart field `{field}`: {source}")]
    Encoding {
        field: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not create request: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("could not send request: {0}")]
    Transport(#[source] TransportError),

    #[error("could not read response body: {0}")]
    ResponseRead(#[source] TransportError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub(crate) fn encoding(
        field: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Encoding {
            field,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Encoding { .. } => ErrorKind::Encoding,
            Error::RequestConstruction(_) => ErrorKind::RequestConstruction,
            Error::Transport(_) => ErrorKind::Transport,
            Error::ResponseRead(_) => ErrorKind::ResponseRead,
            Error::Configuration { .. } | Error::Io(_) | Error::Yaml(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// The context failure behind this error, if the call was cut short by its
    /// [`CallContext`](crate::CallContext).
    pub fn context_error(&self) -> Option<ContextError> {
        match self {
            Error::Transport(TransportError::Context(e))
            | Error::ResponseRead(TransportError::Context(e)) => Some(*e),
            _ => None,
        }
    }

    /// True if the call's context was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.context_error() == Some(ContextError::Cancelled)
    }

    /// True if the call hit its context deadline or a transport-level timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(e) | Error::ResponseRead(e) => e.is_timeout(),
            _ => false,
        }
    }
}
