//! Endpoint probe for the local chat backend.
//!
//! Checks `/health`, then posts one test message to `/api/chat/message`. The
//! chat attempt is not gated on the health result: a backend that fails its
//! health check can still answer chat, and that mismatch is itself a finding.
//! Always exits 0; the diagnosis is the printed report.

use ai_doctor::EndpointProbe;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .with_target(false)
        .try_init();

    let probe = EndpointProbe::new()?;

    let healthy = probe.check_health().await;
    tracing::debug!(healthy, "health check finished");

    println!();
    let _ = probe.test_chat().await;

    Ok(())
}
