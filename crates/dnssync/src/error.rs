//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `LayoutError` and `ConfigError` into user-facing
//! errors with actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use dnssync_config::ConfigError;
use dnssync_core::{CoreError, LayoutError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const LAYOUT: i32 = 9;
    pub const PARTIAL: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the DNS API at {url}")]
    #[diagnostic(
        code(dnssync::connection_failed),
        help(
            "Check network access and the json_endpoint in your credentials file.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(dnssync::timeout),
        help("Increase the timeout with --timeout or the `timeout` config key.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dnssync::auth_failed),
        help(
            "Verify customer, api_key and api_password in your credentials file.\n\
             Store the password in the keyring with: dnssync config set-password"
        )
    )]
    AuthFailed { message: String },

    // ── Layout ───────────────────────────────────────────────────────
    #[error("{source_name}: {error}")]
    #[diagnostic(
        code(dnssync::layout),
        help("Layout lines are tab-indented: zone names at column 0, settings and records one tab in.")
    )]
    Layout {
        source_name: String,
        error: LayoutError,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Domain '{domain}' not found")]
    #[diagnostic(
        code(dnssync::not_found),
        help("The domain must be managed by the netcup account in your credentials file.")
    )]
    DomainNotFound { domain: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(dnssync::api_error))]
    Api { message: String },

    #[error("{failed} of {total} domains failed to sync")]
    #[diagnostic(
        code(dnssync::partial_failure),
        help("See the summary table above; rerun with -v for details.")
    )]
    PartialFailure { failed: usize, total: usize },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dnssync::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(dnssync::config),
        help("Check the config file shown by: dnssync config path")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Committing changes requires confirmation")]
    #[diagnostic(
        code(dnssync::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error("Cannot read {path}: {source}")]
    #[diagnostic(code(dnssync::io))]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(dnssync::serialization))]
    Serialization(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(dnssync::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Layout { .. } => exit_code::LAYOUT,
            Self::DomainNotFound { .. } => exit_code::NOT_FOUND,
            Self::PartialFailure { .. } => exit_code::PARTIAL,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout => Self::Timeout,
            CoreError::DomainNotFound { domain } => Self::DomainNotFound { domain },
            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::Conversion { domain, message } => Self::Api {
                message: format!("{domain}: {message}"),
            },
            CoreError::Layout(error) => Self::Layout {
                source_name: "layout".into(),
                error,
            },
            CoreError::Config { message } => Self::Validation {
                field: "configuration".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
