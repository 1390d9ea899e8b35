// ── Core error types ──
//
// Domain-level errors from ucam-core. Consumers see a small taxonomy
// (network, parameter, archive) rather than raw reqwest or JSON failures.
// The `From<ucam_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Network layer ────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Endpoint or feature not supported by this firmware.
    #[error("Not found on device: {path}")]
    NotFound { path: String },

    #[error("Device server error (HTTP {status})")]
    ServerError { status: u16 },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Cannot reach device: {reason}")]
    TransportError { reason: String },

    // ── Parameter layer ──────────────────────────────────────────────
    #[error("Malformed configuration: {message}")]
    MalformedConfig { message: String },

    #[error("Parameter path not found: {path}")]
    PathNotFound { path: String },

    // ── Archive layer ────────────────────────────────────────────────
    #[error("Archive member not found: {name}")]
    MemberNotFound { name: String },

    #[error("Malformed archive: {message}")]
    MalformedArchive { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ucam_api::Error> for CoreError {
    fn from(err: ucam_api::Error) -> Self {
        match err {
            ucam_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ucam_api::Error::NotFound { path } => CoreError::NotFound { path },
            ucam_api::Error::Server { status } => CoreError::ServerError { status },
            ucam_api::Error::UnexpectedStatus { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            ucam_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ucam_api::Error::Transport(e) => CoreError::TransportError {
                reason: e.to_string(),
            },
            ucam_api::Error::InvalidUrl(e) => CoreError::TransportError {
                reason: format!("invalid URL: {e}"),
            },
            ucam_api::Error::Tls(msg) => CoreError::TransportError {
                reason: format!("TLS error: {msg}"),
            },
            ucam_api::Error::Deserialization { message, body: _ } => CoreError::MalformedConfig {
                message: format!("response is not valid JSON: {message}"),
            },
            ucam_api::Error::Api { message, code: _ } => CoreError::Api {
                message,
                status: None,
            },
        }
    }
}
