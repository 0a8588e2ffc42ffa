//! HTTP transport shared by the probes.

mod http;

pub use http::{default_timeout, HttpTransport, TransportError};
