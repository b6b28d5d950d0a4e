//! Multipart body assembly for transcription uploads.
//!
//! Part order is fixed: `file`, `model`, `language`, `response_format`. The file part
//! streams straight from the caller's reader, so the audio is never held in memory whole.

use super::types::TranscriptionRequest;
use crate::{Error, Result};
use futures::TryStreamExt;
use reqwest::multipart::{Form, Part};
use std::io;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

const FILE_MIME: &str = "application/octet-stream";

/// First error the audio reader produced while the body was being streamed.
///
/// The HTTP layer only sees an opaque body failure; this keeps the real cause so the
/// call can report it as an encoding failure.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReadFailure(Arc<Mutex<Option<io::Error>>>);

impl ReadFailure {
    fn record(&self, err: &io::Error) {
        if let Ok(mut slot) = self.0.lock() {
            if slot.is_none() {
                *slot = Some(io::Error::new(err.kind(), err.to_string()));
            }
        }
    }

    pub(crate) fn take(&self) -> Option<io::Error> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

pub(crate) fn build_form<R>(model: &str, request: TranscriptionRequest<R>) -> Result<(Form, ReadFailure)>
where
    R: AsyncRead + Send + Sync + 'static,
{
    let TranscriptionRequest {
        name,
        language,
        format,
        data,
    } = request;

    let failure = ReadFailure::default();
    let recorder = failure.clone();
    let stream = ReaderStream::new(data).inspect_err(move |e| recorder.record(e));

    let file = Part::stream(reqwest::Body::wrap_stream(stream))
        .file_name(name)
        .mime_str(FILE_MIME)
        .map_err(|e| Error::encoding("file", e))?;

    let form = Form::new()
        .part("file", file)
        .text("model", model.to_string())
        .text("language", language)
        .text("response_format", format);

    Ok((form, failure))
}
