//! Endpoint probe: liveness and one test message against the chat backend.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::transport::HttpTransport;
use crate::Result;

/// Local backend the probe targets.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const HEALTH_PATH: &str = "/health";
pub const CHAT_PATH: &str = "/api/chat/message";

/// Liveness must answer fast; the chat call may block on model inference.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(60);

/// How the chat response body was understood.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatBody {
    /// JSON object carrying the `response` reply field.
    Reply(String),
    /// Valid JSON without the expected field.
    JsonWithoutReply(Value),
    /// Anything that did not parse as JSON.
    Raw(String),
}

/// Outcome of one chat probe.
#[derive(Debug)]
pub enum ChatOutcome {
    Completed {
        status: u16,
        elapsed: Duration,
        body: ChatBody,
    },
    /// The request never produced a response (refused, timed out, ...).
    Failed(String),
}

pub struct EndpointProbe {
    transport: HttpTransport,
}

impl EndpointProbe {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Probe a specific backend (tests point this at a mock server).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url)?,
        })
    }

    /// GET the health path. True only for a 200 within the timeout; any
    /// transport failure is printed and counts as unhealthy.
    pub async fn check_health(&self) -> bool {
        println!(
            "Checking Health: {}{}",
            self.transport.base_url(),
            HEALTH_PATH
        );
        match self.transport.get(HEALTH_PATH, &[], HEALTH_TIMEOUT).await {
            Ok(response) => {
                let status = response.status().as_u16();
                println!("Health Status: {status}");
                status == 200
            }
            Err(err) => {
                println!("Health check failed: {err}");
                false
            }
        }
    }

    /// POST one test message and report status, latency and body. Transport
    /// failures are printed without a status-code line, since none exists.
    pub async fn test_chat(&self) -> ChatOutcome {
        println!(
            "Testing Chat Endpoint: {}{} (Please wait, this may take time...)",
            self.transport.base_url(),
            CHAT_PATH
        );

        let payload = serde_json::json!({ "message": "Hi" });

        let start = Instant::now();
        let response = match self
            .transport
            .post_json(CHAT_PATH, &[], &payload, CHAT_TIMEOUT)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let message = err.to_string();
                println!("Request failed: {message}");
                return ChatOutcome::Failed(message);
            }
        };

        let status = response.status().as_u16();
        let elapsed = start.elapsed();
        println!("Status Code: {status}");
        println!("Time Taken: {:.2}s", elapsed.as_secs_f64());
        debug!(status, elapsed_ms = elapsed.as_millis() as u64, "chat answered");

        let body = match response.text().await {
            Ok(text) => classify_body(&text),
            Err(err) => {
                let message = err.to_string();
                println!("Request failed: {message}");
                return ChatOutcome::Failed(message);
            }
        };
        println!("{}", render_body(&body));

        ChatOutcome::Completed {
            status,
            elapsed,
            body,
        }
    }
}

/// Decide how to present a chat response body. The body is either parsed
/// JSON containing the reply field, parsed JSON without it, or opaque text.
pub fn classify_body(text: &str) -> ChatBody {
    match serde_json::from_str::<Value>(text) {
        Ok(data) => match data.get("response") {
            Some(reply) => {
                let reply = reply
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| reply.to_string());
                ChatBody::Reply(reply)
            }
            None => ChatBody::JsonWithoutReply(data),
        },
        Err(_) => ChatBody::Raw(text.to_string()),
    }
}

/// Render the body section of the chat report.
pub fn render_body(body: &ChatBody) -> String {
    match body {
        ChatBody::Reply(reply) => {
            format!("\n--- BACKEND RESPONSE ---\n\n{reply}\n\n------------------------\n")
        }
        ChatBody::JsonWithoutReply(data) => {
            format!("JSON received but no 'response' field: {data}")
        }
        ChatBody::Raw(text) => format!("Response Text (Not JSON): {text}"),
    }
}
