use thiserror::Error;

/// Unified error type for the diagnostic probes.
///
/// Aggregates low-level failures into the categories the probes report on.
/// Probes never let these escape: every variant ends up as a printed
/// diagnostic line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote error: HTTP {status} ({class}): {message}")]
    Remote {
        status: u16,
        class: String,
        message: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    /// Build a `Remote` error, deriving the class from the status code.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Error::Remote {
            status,
            class: error_class_for_status(status).to_string(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

/// Map an HTTP status onto the standard provider error-class vocabulary.
pub fn error_class_for_status(status: u16) -> &'static str {
    match status {
        400 => "invalid_request",
        401 => "authentication",
        403 => "permission_denied",
        404 => "not_found",
        408 => "timeout",
        413 => "request_too_large",
        429 => "rate_limited",
        500..=599 => "server_error",
        _ => "unknown",
    }
}

/// Classify a failure message into a (kind, suggestion) pair for the
/// error-analysis section of a probe report.
pub fn classify_error(err: &str) -> (&'static str, &'static str) {
    let e = err.to_lowercase();
    // Check 429 / quota before 401 so "429 + insufficient_quota" is not misclassified as auth
    if e.contains("429")
        || e.contains("rate_limited")
        || e.contains("insufficient_quota")
        || e.contains("quota") && (e.contains("exceeded") || e.contains("billing"))
    {
        (
            "429 / rate limited or quota exhausted",
            "Too many requests or quota used up; retry later or check billing.",
        )
    } else if e.contains("401")
        || e.contains("authentication")
        || e.contains("invalid api key")
        || e.contains("api key not valid")
        || e.contains("permission_denied")
        || e.contains("403")
    {
        (
            "401/403 / authentication failed",
            "Check that GEMINI_API_KEY is correct and not expired.",
        )
    } else if e.contains("404") || e.contains("not found") || e.contains("not_found") {
        (
            "404 / resource not found",
            "Confirm the model id is in the provider's current model list; the listing above shows valid options.",
        )
    } else if e.contains("500")
        || e.contains("503")
        || e.contains("server_error")
        || e.contains("overloaded")
    {
        (
            "5xx / server error",
            "The service is temporarily unavailable; retry later.",
        )
    } else if e.contains("timeout") || e.contains("timed out") {
        (
            "timeout",
            "Increase AI_DOCTOR_HTTP_TIMEOUT_SECS or check the network.",
        )
    } else {
        (
            "other",
            "Compare the request against the provider API reference.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class_mapping() {
        assert_eq!(error_class_for_status(401), "authentication");
        assert_eq!(error_class_for_status(404), "not_found");
        assert_eq!(error_class_for_status(429), "rate_limited");
        assert_eq!(error_class_for_status(502), "server_error");
        assert_eq!(error_class_for_status(418), "unknown");
    }

    #[test]
    fn test_remote_error_display() {
        let err = Error::remote(401, "API key not valid");
        assert_eq!(
            err.to_string(),
            "Remote error: HTTP 401 (authentication): API key not valid"
        );
    }

    #[test]
    fn test_quota_checked_before_auth() {
        // A 429 body that also mentions authentication must classify as quota
        let (kind, _) = classify_error("HTTP 429: insufficient_quota for this api key");
        assert!(kind.starts_with("429"));
    }

    #[test]
    fn test_auth_classification() {
        let (kind, suggestion) = classify_error("Remote error: HTTP 401 (authentication): bad key");
        assert!(kind.contains("authentication"));
        assert!(suggestion.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_timeout_classification() {
        let (kind, _) = classify_error("operation timed out");
        assert_eq!(kind, "timeout");
    }
}
