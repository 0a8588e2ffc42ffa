//! Gemini generateContent API client used by the credential probe.
//!
//! Wire format notes:
//! - Requests use `contents` with `parts`; conversation roles are `user` and
//!   `model`.
//! - The API key rides as the `key` query parameter, not in headers.
//! - Responses carry text at `candidates[0].content.parts[0].text`.
//! - Error bodies look like `{ "error": { "message": ..., "status": ... } }`.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::transport::{default_timeout, HttpTransport};
use crate::{Error, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model the probe exercises. Fixed on purpose: the probe answers "does this
/// deployment's model work", not "which model should we use".
pub const MODEL: &str = "gemini-1.5-flash";

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One entry from the ListModels response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelEntry {
    /// Whether the model can serve `generateContent` requests.
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

pub struct GeminiClient {
    transport: HttpTransport,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiClient {
    /// Build a client against the public API, reading the key from the
    /// environment. A missing key is not an error here: the request is still
    /// attempted and rejected at the API boundary.
    pub fn from_env() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Build a client against a specific API root (tests point this at a
    /// mock server).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url)?,
            api_key: env::var(API_KEY_ENV).ok(),
            timeout: default_timeout(),
        })
    }

    /// Replace the key read from the environment.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn key_query(&self) -> Vec<(&str, &str)> {
        self.api_key
            .as_deref()
            .map(|k| ("key", k))
            .into_iter()
            .collect()
    }

    /// Issue one minimal generation request and return the reply text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });
        let path = format!("/models/{MODEL}:generateContent");

        let response = self
            .transport
            .post_json(&path, &self.key_query(), &body, self.timeout)
            .await?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.into()))?;
        debug!(status, "generateContent answered");

        if !(200..300).contains(&status) {
            return Err(remote_error(status, &text));
        }

        let payload: Value = serde_json::from_str(&text)?;
        extract_reply(&payload).ok_or_else(|| Error::validation("response carries no candidate text"))
    }

    /// Fetch the full model list. Callers filter on capability.
    pub async fn list_models(&self) -> Result<Vec<ModelEntry>> {
        let response = self
            .transport
            .get("/models", &self.key_query(), self.timeout)
            .await?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.into()))?;
        debug!(status, "ListModels answered");

        if !(200..300).contains(&status) {
            return Err(remote_error(status, &text));
        }

        let payload: Value = serde_json::from_str(&text)?;
        Ok(parse_model_entries(&payload))
    }
}

/// Extract `candidates[0].content.parts[0].text`.
fn extract_reply(payload: &Value) -> Option<String> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(String::from)
}

/// Turn a non-success response into `Error::Remote`, pulling the message out
/// of the Gemini error body when it parses; otherwise the raw text stands in.
fn remote_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string());
    Error::remote(status, message)
}

fn parse_model_entries(payload: &Value) -> Vec<ModelEntry> {
    payload
        .get("models")
        .and_then(Value::as_array)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| serde_json::from_value(m.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
