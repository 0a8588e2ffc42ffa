use std::env;
use std::time::Duration;

use reqwest::Proxy;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::Result;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default total-request timeout (env-overridable).
pub fn default_timeout() -> Duration {
    env::var("AI_DOCTOR_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// A configured `reqwest` client bound to one base URL.
///
/// Timeouts are per request: the two endpoint-probe calls carry different
/// budgets against the same backend.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Ok(proxy_url) = env::var("AI_DOCTOR_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` with optional query parameters.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        debug!(%url, %request_id, "GET");

        self.client
            .get(&url)
            .query(query)
            .header("x-request-id", &request_id)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))
    }

    /// POST `{base_url}{path}` with a JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        debug!(%url, %request_id, "POST");

        self.client
            .post(&url)
            .query(query)
            .json(body)
            .header("x-request-id", &request_id)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
