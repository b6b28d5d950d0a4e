//! STT (Speech-to-Text) client.

use super::form;
use super::types::{
    TranscriptionRequest, TranscriptionResponse, AUDIO_TRANSCRIPTION_URL, DEFAULT_BASE_URL,
    TRANSCRIPTIONS_PATH,
};
use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::transport::{self, TransportError};
use crate::{Error, Result};
use std::fmt;
use std::time::Duration;
use tokio::io::AsyncRead;
use tracing::{debug, debug_span, trace, Instrument};
use uuid::Uuid;

/// Client for a Whisper-style transcription endpoint.
///
/// Holds no per-call state, so one instance can serve concurrent calls. Every call
/// builds its own multipart body with its own boundary.
#[derive(Clone)]
pub struct TranscriptionClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl TranscriptionClient {
    /// Client for the OpenAI transcription endpoint.
    pub fn new(
        http_client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: AUDIO_TRANSCRIPTION_URL.to_string(),
        }
    }

    pub fn builder() -> TranscriptionClientBuilder {
        TranscriptionClientBuilder::new()
    }

    /// Upload `request` and return the raw response.
    ///
    /// The audio reader is streamed into the `file` part and dropped when the call
    /// ends. Any HTTP status counts as a response; only failures to encode, build,
    /// send or read are errors. `ctx` is checked before anything is sent and raced
    /// against both the send and the body read.
    pub async fn transcribe_audio<R>(
        &self,
        ctx: &CallContext,
        request: TranscriptionRequest<R>,
    ) -> Result<TranscriptionResponse>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        let span = debug_span!(
            "transcribe_audio",
            request_id = %Uuid::new_v4(),
            endpoint = %self.endpoint,
            model = %self.model,
            file = %request.name,
            language = %request.language,
            format = %request.format,
        );
        self.transcribe_inner(ctx, request).instrument(span).await
    }

    async fn transcribe_inner<R>(
        &self,
        ctx: &CallContext,
        request: TranscriptionRequest<R>,
    ) -> Result<TranscriptionResponse>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        if let Some(e) = ctx.err() {
            return Err(Error::Transport(e.into()));
        }

        let (form, read_failure) = form::build_form(&self.model, request)?;
        trace!(boundary = %form.boundary(), "multipart body prepared");

        let request = self
            .http_client
            .post(self.endpoint.as_str())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .build()
            .map_err(Error::RequestConstruction)?;

        debug!("sending transcription request");
        let sent = tokio::select! {
            biased;
            e = ctx.done() => return Err(Error::Transport(e.into())),
            res = self.http_client.execute(request) => res,
        };
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                if let Some(cause) = read_failure.take() {
                    return Err(Error::encoding("file", cause));
                }
                return Err(Error::Transport(TransportError::Http(e)));
            }
        };

        let status = response.status();
        trace!(%status, "response headers received");

        let body = tokio::select! {
            biased;
            e = ctx.done() => return Err(Error::ResponseRead(e.into())),
            res = response.bytes() => res.map_err(|e| Error::ResponseRead(TransportError::Http(e)))?,
        };

        // A server may answer before the upload finished; a short upload is still a failure.
        if let Some(cause) = read_failure.take() {
            return Err(Error::encoding("file", cause));
        }

        debug!(%status, bytes = body.len(), "transcription response read");
        Ok(TranscriptionResponse::new(status, body))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for TranscriptionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

pub struct TranscriptionClientBuilder {
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl TranscriptionClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            endpoint_path: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Seed the builder from loaded configuration. Later setter calls still win.
    pub fn from_config(config: ClientConfig) -> Self {
        let model = config.model_or_default().to_string();
        Self {
            model: Some(model),
            api_key: config.api_key,
            base_url: config.base_url,
            endpoint_path: config.endpoint_path,
            timeout: config.timeout_secs.map(Duration::from_secs),
            http_client: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }
    /// Transport-level cap on the whole exchange. Ignored when `http_client` is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<TranscriptionClient> {
        let model = self
            .model
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| Error::configuration("Model must be specified"))?;
        let api_key = self
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::configuration("API key required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| TRANSCRIPTIONS_PATH.to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), endpoint_path);
        let parsed = url::Url::parse(&endpoint)
            .map_err(|e| Error::configuration(format!("Invalid endpoint {}: {}", endpoint, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "Unsupported endpoint scheme: {}",
                parsed.scheme()
            )));
        }
        let http_client = match self.http_client {
            Some(client) => client,
            None => transport::default_client(self.timeout)?,
        };
        Ok(TranscriptionClient {
            http_client,
            api_key,
            model,
            endpoint: parsed.to_string(),
        })
    }
}

impl Default for TranscriptionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
