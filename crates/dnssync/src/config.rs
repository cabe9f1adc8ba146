//! Glue between the global flags and `dnssync-config`.
//!
//! Flags win over the config file, which wins over built-in defaults.

use std::path::PathBuf;

use dnssync_config::Config;
use dnssync_core::SyncConfig;

use crate::cli::{ColorMode, GlobalOpts};
use crate::error::CliError;

/// Effective configuration for one invocation.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    /// Where the config was (or would have been) read from.
    pub path: PathBuf,
}

/// Load the config file named by `--config`, or the default one, and apply
/// the `--timeout` and `--credentials` overrides.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(dnssync_config::config_path);
    let mut config = dnssync_config::load_config_from(&path)?;

    if let Some(timeout) = global.timeout {
        if timeout == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        config.timeout = timeout;
    }
    if let Some(credentials) = &global.credentials {
        config.credentials.clone_from(credentials);
    }
    Ok(Settings { config, path })
}

impl Settings {
    /// Credentials and transport settings for the API client.
    pub fn sync_config(&self) -> Result<SyncConfig, CliError> {
        Ok(dnssync_config::sync_config(&self.config)?)
    }

    /// The `--color` flag, falling back to the config's `color` key.
    pub fn color(&self, global: &GlobalOpts) -> ColorMode {
        global.color.unwrap_or(match self.config.color.as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        })
    }
}
