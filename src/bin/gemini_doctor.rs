//! Credential/model probe for the Gemini API.
//!
//! Checks that `GEMINI_API_KEY` is present, issues one minimal generation
//! request against the fixed model, and lists generation-capable models when
//! the request fails. Always exits 0; the diagnosis is the printed report.
//!
//! Usage:
//!   GEMINI_API_KEY="..." gemini-doctor
//! Or with the key in a local .env file:
//!   gemini-doctor

use ai_doctor::probe::credential::{self, GenerationOutcome};
use ai_doctor::{classify_error, GeminiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .with_target(false)
        .try_init();

    // Pick up GEMINI_API_KEY from a local .env when present.
    dotenvy::dotenv().ok();

    let client = GeminiClient::from_env()?;
    let report = credential::run(&client).await;

    if let GenerationOutcome::Failed { error, .. } = &report.generation {
        let (kind, suggestion) = classify_error(error);
        println!();
        println!("=== Error analysis ===");
        println!("[{kind}] {suggestion}");
    }

    Ok(())
}
