//! Client configuration
//!
//! Construction values for a [`TranscriptionClient`](crate::TranscriptionClient), loadable
//! from YAML and overridable from the environment.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "WHISPER_MODEL";
pub const ENV_BASE_URL: &str = "WHISPER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "WHISPER_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Apply `OPENAI_API_KEY`, `WHISPER_MODEL`, `WHISPER_BASE_URL` and
    /// `WHISPER_TIMEOUT_SECS` on top of the current values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with a custom lookup.
    /// Empty values are ignored; an unparsable timeout keeps the existing one.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = get(ENV_MODEL) {
            self.model = Some(v);
        }
        if let Some(v) = get(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.timeout_secs = Some(secs);
        }
        self
    }

    /// Model to send, falling back to `whisper-1`.
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(crate::stt::DEFAULT_MODEL)
    }
}
