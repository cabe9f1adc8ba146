// ── Core error types ──
//
// Validation errors for the model (`RecordError`, `SettingError`,
// `DirectiveError`), parse errors for the layout DSL (`LayoutError`), and
// the user-facing `CoreError`. The `From<dnssync_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::model::RecordType;

// ── Model validation ─────────────────────────────────────────────────

/// A record violates the per-type shape rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unknown record type '{name}', valid types are: {valid}")]
    UnknownType { name: String, valid: String },

    #[error("MX record requires a priority")]
    MissingPriority,

    #[error("{record_type} record must not carry a priority")]
    UnexpectedPriority { record_type: RecordType },

    #[error("{field} {value:?} cannot be written as a layout token")]
    NotAToken { field: &'static str, value: String },

    #[error("{record_type} record destination '{destination}' is not a valid {family} address")]
    AddressFamily {
        record_type: RecordType,
        destination: String,
        family: &'static str,
    },
}

/// A zone-level setting name or value is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("unknown setting '{name}', valid settings are: {valid}")]
    UnknownSetting { name: String, valid: String },

    #[error("invalid value '{value}' for setting '{setting}': {reason}")]
    InvalidValue {
        setting: String,
        value: String,
        reason: String,
    },
}

/// A meta directive is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("unknown directive action '{name}', valid actions are: {valid}")]
    UnknownAction { name: String, valid: String },

    #[error("unknown directive filter '{key}', valid filters are: type, hostname, destination")]
    UnknownFilter { key: String },

    #[error("directive filter '{key}' given more than once")]
    DuplicateFilter { key: String },

    #[error("directive filter '{token}' is not of the form key=value")]
    MalformedFilter { token: String },

    #[error(transparent)]
    RecordType(#[from] RecordError),
}

// ── Layout DSL ───────────────────────────────────────────────────────

/// Fatal error while parsing layout text. No partial layout survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The line matches no known (indent, token count) shape.
    #[error("syntax error in line {line}: {content:?}")]
    Syntax { line: usize, content: String },

    /// The line has a known shape but its content is invalid.
    #[error("configuration error in line {line} ({content:?}): {reason}")]
    Configuration {
        line: usize,
        content: String,
        reason: String,
    },
}

// ── User-facing errors ───────────────────────────────────────────────

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to API endpoint at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// The endpoint's numeric status code (e.g. 5029), if any.
        code: Option<i64>,
        /// HTTP status code, if the failure happened at the HTTP level.
        status: Option<u16>,
    },

    #[error("Domain '{domain}' not found")]
    DomainNotFound { domain: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Remote data for {domain} is unusable: {message}")]
    Conversion { domain: String, message: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dnssync_api::Error> for CoreError {
    fn from(err: dnssync_api::Error) -> Self {
        match err {
            dnssync_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            dnssync_api::Error::SessionRequired { action } => CoreError::AuthenticationFailed {
                message: format!("no valid session for '{action}'"),
            },
            dnssync_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            dnssync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            dnssync_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            dnssync_api::Error::Http { action, status } => CoreError::Api {
                message: format!("HTTP {status} during '{action}'"),
                code: None,
                status: Some(status),
            },
            dnssync_api::Error::Api {
                action,
                status_code,
                message,
            } => CoreError::Api {
                message: format!("{action}: {message}"),
                code: Some(status_code),
                status: None,
            },
            dnssync_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_envelope_error_keeps_status_code() {
        let err = CoreError::from(dnssync_api::Error::Api {
            action: "infoDnsZone".into(),
            status_code: 5029,
            message: "Domain not found.".into(),
        });
        match err {
            CoreError::Api { message, code, .. } => {
                assert_eq!(code, Some(5029));
                assert!(message.contains("infoDnsZone"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn missing_session_is_auth_failure() {
        let err = CoreError::from(dnssync_api::Error::SessionRequired {
            action: "infoDnsRecords".into(),
        });
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn layout_error_reports_line() {
        let err = LayoutError::Syntax {
            line: 7,
            content: "\t\tA".into(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
