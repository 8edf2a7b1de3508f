//! Error types module
//!
//! All SDK errors are unified under the `ZapdosError` enum. Only failures
//! that terminate an operation live here: per-line NDJSON decode problems
//! and degraded metadata commits are absorbed and logged where they occur,
//! never raised as errors.

use thiserror::Error;

/// Errors surfaced by the Zapdos client.
#[derive(Debug, Error)]
pub enum ZapdosError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(
        "Malformed signed URL: token present: {token_present}, object id present: {object_id_present}"
    )]
    MalformedSignedUrl {
        token_present: bool,
        object_id_present: bool,
    },

    #[error("Upload transport failed: {message}")]
    TransportFailure { message: String },

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for SDK operations
pub type ZapdosResult<T> = Result<T, ZapdosError>;

impl ZapdosError {
    /// Human-readable message suitable for the `on_failed` callback and the
    /// per-file `error` outcome arm.
    pub fn failure_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_signed_url_reports_presence_flags() {
        let err = ZapdosError::MalformedSignedUrl {
            token_present: true,
            object_id_present: false,
        };
        let msg = err.to_string();
        assert!(msg.contains("token present: true"));
        assert!(msg.contains("object id present: false"));
    }

    #[test]
    fn transport_failure_keeps_message() {
        let err = ZapdosError::TransportFailure {
            message: "connection reset".to_string(),
        };
        assert!(err.to_string().contains("connection reset"));
    }
}
