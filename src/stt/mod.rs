//! STT (Speech-to-Text) module: uploads audio to a Whisper-style transcription endpoint
//! as multipart form data and hands back the endpoint's raw response.

mod client;
mod form;
mod types;

pub use client::{TranscriptionClient, TranscriptionClientBuilder};
pub use types::{
    TranscriptionRequest, TranscriptionResponse, AUDIO_TRANSCRIPTION_URL, DEFAULT_BASE_URL,
    DEFAULT_MODEL, FORMAT_JSON, FORMAT_SRT, FORMAT_TEXT, FORMAT_VERBOSE_JSON, FORMAT_VTT,
    LANGUAGE_ENGLISH, LANGUAGE_PORTUGUESE, TRANSCRIPTIONS_PATH,
};
