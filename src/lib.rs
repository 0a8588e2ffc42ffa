//! # ai-doctor
//!
//! Connectivity diagnostics for the AI chat stack. Two independent probes,
//! each shipped as its own binary:
//!
//! - **Credential/model probe** (`gemini-doctor`): verifies that
//!   `GEMINI_API_KEY` is present and functional by issuing one minimal
//!   generation request; on failure it lists the generation-capable models
//!   as a fallback diagnostic.
//! - **Endpoint probe** (`chat-doctor`): checks liveness of the local chat
//!   backend and posts one test message, reporting status code, latency and
//!   body.
//!
//! The one design rule both probes follow: every outbound call sits behind a
//! local fault boundary that converts errors into printed diagnostics, so a
//! probe always runs to completion and always prints a human-readable
//! outcome.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`gemini`] | Gemini generateContent / ListModels client |
//! | [`probe`] | The credential and endpoint probes |
//! | [`transport`] | reqwest-based HTTP transport with per-request timeouts |
//! | [`error`] | Unified error type and diagnostic classification |

pub mod gemini;
pub mod probe;
pub mod transport;

// Re-export main types for convenience
pub use gemini::{GeminiClient, ModelEntry};
pub use probe::credential::{CredentialReport, GenerationOutcome, KeyStatus, ListingOutcome};
pub use probe::endpoint::{ChatBody, ChatOutcome, EndpointProbe};

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub mod error;
pub use error::{classify_error, Error};
