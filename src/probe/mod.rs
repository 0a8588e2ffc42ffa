//! Diagnostic probes.
//!
//! A probe is a short-lived routine that performs one or two external calls
//! and reports the outcome on stdout. Every outbound call sits behind a local
//! fault boundary: failures become printed diagnostic lines, never propagated
//! errors. Nothing is retried and nothing is persisted.

pub mod credential;
pub mod endpoint;
