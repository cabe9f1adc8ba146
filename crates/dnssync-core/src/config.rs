// ── Runtime connection configuration ──
//
// Describes *how* to reach the provider. The CLI resolves config files and
// credentials and hands a `SyncConfig` in; core never reads files itself.

use std::path::PathBuf;
use std::time::Duration;

use dnssync_api::client::DEFAULT_ENDPOINT;
use dnssync_api::{Credentials, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Additionally trust this PEM CA certificate.
    CustomCa(PathBuf),
}

/// Everything needed to open a session with the provider.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// JSON endpoint URL.
    pub endpoint: Url,
    pub credentials: Credentials,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SyncConfig {
    /// Config for the public endpoint with default transport settings.
    pub fn new(credentials: Credentials) -> Result<Self, CoreError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).map_err(|e| CoreError::Config {
            message: format!("invalid default endpoint: {e}"),
        })?;
        Ok(Self {
            endpoint,
            credentials,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        })
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            },
            timeout: self.timeout,
        }
    }
}
