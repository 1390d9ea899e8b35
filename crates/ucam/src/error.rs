//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ucam_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach camera: {reason}")]
    #[diagnostic(
        code(ucam::connection_failed),
        help(
            "Check that the camera is powered and reachable.\n\
             Try a different --port, or --scheme https."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(ucam::timeout),
        help("Increase the timeout with --timeout or check camera load.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ucam::auth_failed),
        help(
            "Verify --username/--password.\n\
             VAPIX configuration endpoints may need --admin-username/--admin-password."
        )
    )]
    AuthFailed { message: String },

    #[error("No password given for '{username}'")]
    #[diagnostic(
        code(ucam::no_credentials),
        help("Pass the camera password with --password (-p).")
    )]
    NoCredentials { username: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("{what} '{identifier}' not found")]
    #[diagnostic(code(ucam::not_found), help("{hint}"))]
    NotFound {
        what: String,
        identifier: String,
        hint: String,
    },

    // ── Device data ──────────────────────────────────────────────────
    #[error("Camera server error (HTTP {status})")]
    #[diagnostic(
        code(ucam::server_error),
        help("The camera failed to handle the request; retry shortly.")
    )]
    ServerError { status: u16 },

    #[error("Unexpected data from camera: {message}")]
    #[diagnostic(
        code(ucam::malformed),
        help("Run with -vv to see the request that returned it.")
    )]
    Malformed { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(ucam::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ucam::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(ucam::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::TransportError { reason } => CliError::ConnectionFailed { reason },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::ServerError { status } => CliError::ServerError { status },

            CoreError::NotFound { path } => CliError::NotFound {
                what: "Endpoint".into(),
                identifier: path,
                hint: "This firmware does not expose the endpoint.".into(),
            },

            CoreError::PathNotFound { path } => CliError::NotFound {
                what: "Parameter".into(),
                identifier: path,
                hint: "Run: ucam params search <text> to find the full path".into(),
            },

            CoreError::MemberNotFound { name } => CliError::NotFound {
                what: "Log file".into(),
                identifier: name,
                hint: "Run: ucam logs files to see what the report contains".into(),
            },

            CoreError::MalformedConfig { message } | CoreError::MalformedArchive { message } => {
                CliError::Malformed { message }
            }

            CoreError::Api { message, status: _ } => CliError::ApiError { message },
        }
    }
}
