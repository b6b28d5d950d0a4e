//! # whisper-client
//!
//! Thin async client for Whisper-style speech-to-text endpoints.
//!
//! The client uploads an audio stream plus its metadata as `multipart/form-data`,
//! authenticates with a bearer key, and returns the endpoint's response body untouched.
//! It does not parse transcripts, retry, or turn HTTP error statuses into errors; those
//! decisions stay with the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whisper_client::{CallContext, TranscriptionClient, TranscriptionRequest, FORMAT_SRT};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> whisper_client::Result<()> {
//!     let client = TranscriptionClient::builder()
//!         .model("whisper-1")
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let audio = tokio::fs::File::open("meeting.mp3").await?;
//!     let ctx = CallContext::with_timeout(Duration::from_secs(120));
//!     let response = client
//!         .transcribe_audio(&ctx, TranscriptionRequest::new("meeting.mp3", "en", FORMAT_SRT, audio))
//!         .await?;
//!
//!     println!("{} {}", response.status(), response.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`stt`] | Transcription client, request/response types, multipart encoding |
//! | [`context`] | Per-call cancellation and deadlines |
//! | [`transport`] | HTTP client construction and transport failures |
//! | [`config`] | YAML / environment configuration |

pub mod config;
pub mod context;
pub mod stt;
pub mod transport;

pub use config::ClientConfig;
pub use context::{CallContext, ContextError};
pub use stt::{
    TranscriptionClient, TranscriptionClientBuilder, TranscriptionRequest, TranscriptionResponse,
    AUDIO_TRANSCRIPTION_URL, DEFAULT_MODEL, FORMAT_JSON, FORMAT_SRT, FORMAT_TEXT,
    FORMAT_VERBOSE_JSON, FORMAT_VTT, LANGUAGE_ENGLISH, LANGUAGE_PORTUGUESE,
};
pub use transport::TransportError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorKind};
