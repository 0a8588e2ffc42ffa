//! Credential/model probe: is the Gemini API key present and functional?
//!
//! Linear, two-stage run: key check, one generation attempt, and on failure a
//! model-listing fallback that narrows down the cause.

use std::env;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::gemini::{GeminiClient, API_KEY_ENV, MODEL};

/// Presence (never the value) of the API key in the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    Found { length: usize },
    Missing,
}

impl KeyStatus {
    /// Inspect the environment without retaining the key value.
    pub fn from_env() -> Self {
        match env::var(API_KEY_ENV) {
            Ok(key) => KeyStatus::Found { length: key.len() },
            Err(_) => KeyStatus::Missing,
        }
    }

    /// The single report line for this status. Only the key's length is ever
    /// shown, so the report is safe to paste into logs and issues.
    pub fn report_line(&self) -> String {
        match self {
            KeyStatus::Found { length } => {
                format!("[FOUND] {API_KEY_ENV} is found (Length: {length})")
            }
            KeyStatus::Missing => {
                format!("[MISSING] {API_KEY_ENV} is missing in environment variables.")
            }
        }
    }
}

/// Result of the single generation attempt.
#[derive(Debug)]
pub enum GenerationOutcome {
    Success { text: String, elapsed: Duration },
    Failed { error: String, fallback: ListingOutcome },
}

/// Result of the model-listing fallback.
#[derive(Debug)]
pub enum ListingOutcome {
    /// Names of the models that support content generation.
    Listed(Vec<String>),
    Failed(String),
}

/// Everything one probe run observed.
#[derive(Debug)]
pub struct CredentialReport {
    pub key_status: KeyStatus,
    pub generation: GenerationOutcome,
}

/// Run the probe. Prints progressively and never returns an error: a missing
/// key is reported and the request is attempted anyway, so the failure
/// surfaces at the API boundary where the error message is most specific.
pub async fn run(client: &GeminiClient) -> CredentialReport {
    println!("Checking API Key...");
    let key_status = KeyStatus::from_env();
    println!("{}", key_status.report_line());

    println!();
    println!("--- Testing Gemini Direct ---");
    println!("Attempting to use model: {MODEL}");

    let start = Instant::now();
    let generation = match client.generate_content("Hello").await {
        Ok(text) => {
            let elapsed = start.elapsed();
            println!("[SUCCESS] Response: {text}");
            debug!(elapsed_ms = elapsed.as_millis() as u64, "generation succeeded");
            GenerationOutcome::Success { text, elapsed }
        }
        Err(err) => {
            let error = err.to_string();
            println!("[ERROR] Error using Gemini: {error}");
            let fallback = list_fallback(client).await;
            GenerationOutcome::Failed { error, fallback }
        }
    };

    CredentialReport {
        key_status,
        generation,
    }
}

async fn list_fallback(client: &GeminiClient) -> ListingOutcome {
    println!();
    println!("Listing available models:");
    match client.list_models().await {
        Ok(models) => {
            let names: Vec<String> = models
                .iter()
                .filter(|m| m.supports_generation())
                .map(|m| m.name.clone())
                .collect();
            for name in &names {
                println!(" - {name}");
            }
            ListingOutcome::Listed(names)
        }
        Err(err) => {
            let error = err.to_string();
            println!("[ERROR] Could not list models: {error}");
            ListingOutcome::Failed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_line_carries_exact_length() {
        let status = KeyStatus::Found { length: 39 };
        assert_eq!(
            status.report_line(),
            "[FOUND] GEMINI_API_KEY is found (Length: 39)"
        );
    }

    #[test]
    fn test_missing_line_has_no_length() {
        let line = KeyStatus::Missing.report_line();
        assert_eq!(
            line,
            "[MISSING] GEMINI_API_KEY is missing in environment variables."
        );
        assert!(!line.contains("Length"));
    }
}
