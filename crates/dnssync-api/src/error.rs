use thiserror::Error;

/// Top-level error type for the `dnssync-api` crate.
///
/// Covers every failure mode of the JSON endpoint: session handling,
/// transport, non-success envelopes and undecodable payloads.
/// `dnssync-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// Login was rejected by the endpoint.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A session action was attempted before `login()` succeeded.
    #[error("Action '{action}' requires a valid session -- log in first")]
    SessionRequired { action: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The endpoint answered with a non-2xx HTTP status.
    #[error("HTTP {status} from endpoint during '{action}'")]
    Http { action: String, status: u16 },

    // ── API ─────────────────────────────────────────────────────────
    /// The response envelope carried a non-success status.
    #[error("API error during '{action}': {message} (status code {status_code})")]
    Api {
        action: String,
        status_code: i64,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the session is gone and a fresh login might help.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::SessionRequired { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Extract the API status code, if available.
    pub fn api_status_code(&self) -> Option<i64> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
