//! Configuration for the dnssync CLI.
//!
//! A small TOML config file (figment: defaults, then file, then `DNSSYNC_`
//! environment variables), the provider's JSON credentials file, and the
//! API password chain (env, keyring, plaintext). The result is translated
//! into a `dnssync_core::SyncConfig`; core itself never touches disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use dnssync_core::{Credentials, SyncConfig, TlsVerification};

/// Environment variable that overrides the API password.
pub const PASSWORD_ENV: &str = "DNSSYNC_API_PASSWORD";

const KEYRING_SERVICE: &str = "dnssync";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("cannot read credentials file {}: {reason}", path.display())]
    Credentials { path: PathBuf, reason: String },

    #[error("no API password found for customer {customer}")]
    NoPassword { customer: String },

    #[error("keyring access failed: {reason}")]
    Keyring { reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Path of the JSON credentials file.
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// `auto`, `always` or `never`.
    #[serde(default = "default_color")]
    pub color: String,

    /// Print records sorted instead of in declaration order.
    #[serde(default)]
    pub sort_records: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: default_credentials(),
            timeout: default_timeout(),
            ca_cert: None,
            color: default_color(),
            sort_records: false,
        }
    }
}

fn default_credentials() -> PathBuf {
    BaseDirs::new().map_or_else(
        || PathBuf::from(".config/dnssync/credentials.json"),
        |dirs| dirs.home_dir().join(".config/dnssync/credentials.json"),
    )
}
fn default_timeout() -> u64 {
    30
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "dnssync", "dnssync").map_or_else(
        || default_credentials().with_file_name("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` plus environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DNSSYNC_").only(&[
            "credentials",
            "timeout",
            "ca_cert",
            "color",
            "sort_records",
        ]));

    let config: Config = figment.extract()?;
    if config.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }
    Ok(config)
}

/// Render `config` as TOML for display.
pub fn render_config(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

// ── Credentials file ────────────────────────────────────────────────

/// The provider credentials document.
///
/// ```json
/// { "json_endpoint": "https://ccp.netcup.net/run/webservice/servers/endpoint.php?JSON",
///   "customer": 12345, "api_key": "...", "api_password": "..." }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub json_endpoint: Option<String>,
    #[serde(deserialize_with = "customer_number")]
    pub customer: String,
    pub api_key: String,
    #[serde(default)]
    pub api_password: Option<String>,
}

fn customer_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

impl CredentialsFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let fail = |reason: String| ConfigError::Credentials {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| fail(e.to_string()))
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API password: env var, then keyring, then the file.
pub fn resolve_api_password(file: &CredentialsFile) -> Result<SecretString, ConfigError> {
    password_chain(
        std::env::var(PASSWORD_ENV).ok(),
        || keyring_password(&file.customer),
        file,
    )
}

fn keyring_entry(customer: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{customer}/api-password"))
}

fn keyring_password(customer: &str) -> Option<String> {
    keyring_entry(customer).ok()?.get_password().ok()
}

/// Store the API password of `customer` in the system keyring.
pub fn store_api_password(customer: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(customer)
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Keyring {
            reason: e.to_string(),
        })
}

fn password_chain(
    from_env: Option<String>,
    from_keyring: impl FnOnce() -> Option<String>,
    file: &CredentialsFile,
) -> Result<SecretString, ConfigError> {
    from_env
        .filter(|p| !p.is_empty())
        .or_else(from_keyring)
        .or_else(|| file.api_password.clone())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::NoPassword {
            customer: file.customer.clone(),
        })
}

/// Build a `SyncConfig` from the config and its credentials file.
pub fn sync_config(config: &Config) -> Result<SyncConfig, ConfigError> {
    let file = CredentialsFile::load(&config.credentials)?;
    let password = resolve_api_password(&file)?;
    build_sync_config(config, &file, password)
}

fn build_sync_config(
    config: &Config,
    file: &CredentialsFile,
    password: SecretString,
) -> Result<SyncConfig, ConfigError> {
    let credentials = Credentials::new(
        file.customer.clone(),
        SecretString::from(file.api_key.clone()),
        password,
    );
    let mut sync = SyncConfig::new(credentials).map_err(|e| ConfigError::Validation {
        field: "json_endpoint".into(),
        reason: e.to_string(),
    })?;

    if let Some(endpoint) = &file.json_endpoint {
        sync.endpoint = endpoint.parse().map_err(|e| ConfigError::Validation {
            field: "json_endpoint".into(),
            reason: format!("invalid URL '{endpoint}': {e}"),
        })?;
    }
    if let Some(ca) = &config.ca_cert {
        sync.tls = TlsVerification::CustomCa(ca.clone());
    }
    sync.timeout = Duration::from_secs(config.timeout);
    Ok(sync)
}
