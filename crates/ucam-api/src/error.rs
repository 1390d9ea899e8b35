use thiserror::Error;

/// Top-level error type for the `ucam-api` crate.
///
/// Covers every failure mode of a single request against a camera:
/// authentication, transport, HTTP status classification, and payload decoding.
/// `ucam-core` maps these into domain-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The device rejected the credentials (401 after the challenge retry,
    /// or a challenge the client cannot answer).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── HTTP status ─────────────────────────────────────────────────
    /// 404 -- endpoint or feature not supported by this firmware.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// 5xx from the device.
    #[error("Device server error (HTTP {status})")]
    Server { status: u16 },

    /// Any other non-success status (403, 400, ...).
    #[error("Unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, reset, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The VAPIX REST envelope reported `status != "success"`.
    #[error("VAPIX API error: {message}")]
    Api { message: String, code: Option<i64> },
}
