//! STT (Speech-to-Text) request and response types.

use bytes::Bytes;
use reqwest::StatusCode;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const TRANSCRIPTIONS_PATH: &str = "/v1/audio/transcriptions";
pub const AUDIO_TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
pub const DEFAULT_MODEL: &str = "whisper-1";

/// Recognized `response_format` values. Any other string is still sent verbatim.
pub const FORMAT_JSON: &str = "json";
pub const FORMAT_TEXT: &str = "text";
pub const FORMAT_SRT: &str = "srt";
pub const FORMAT_VERBOSE_JSON: &str = "verbose_json";
pub const FORMAT_VTT: &str = "vtt";

pub const LANGUAGE_ENGLISH: &str = "en";
pub const LANGUAGE_PORTUGUESE: &str = "pt";

/// One transcription call's input. Consumed by
/// [`TranscriptionClient::transcribe_audio`](super::TranscriptionClient::transcribe_audio).
#[derive(Debug)]
pub struct TranscriptionRequest<R> {
    /// Filename reported in the multipart `file` part.
    pub name: String,
    pub language: String,
    pub format: String,
    /// Audio payload, read to exhaustion and never shut down by the client.
    pub data: R,
}

impl<R> TranscriptionRequest<R> {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        format: impl Into<String>,
        data: R,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            format: format.into(),
            data,
        }
    }
}

/// Raw response from the transcription endpoint.
///
/// The body is returned whatever the status; callers decide what a non-2xx means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResponse {
    status: StatusCode,
    body: Bytes,
}

impl TranscriptionResponse {
    pub fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }
}
