// ── Zones ──

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumString, VariantNames};

use super::Record;
use crate::error::SettingError;

/// Name of a zone-level scalar setting, as written after the `.` in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum ZoneSetting {
    Ttl,
    Refresh,
    Retry,
    Expire,
    Dnssec,
}

impl ZoneSetting {
    /// Resolve a setting name; the error names every valid setting.
    pub fn parse(name: &str) -> Result<Self, SettingError> {
        Self::from_str(name).map_err(|_| SettingError::UnknownSetting {
            name: name.to_owned(),
            valid: Self::VARIANTS.join(", "),
        })
    }
}

/// The five scalar settings compared by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ZoneSettings {
    pub ttl: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub dnssec: bool,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            ttl: 86_400,
            refresh: 28_800,
            retry: 7_200,
            expire: 1_209_600,
            dnssec: false,
        }
    }
}

impl ZoneSettings {
    /// Parse `value` for `setting` and store it.
    ///
    /// Timers must be positive integers. `dnssec` takes
    /// `y/yes/true/on/1` or `n/no/false/off/0`, case-insensitively.
    pub fn set(&mut self, setting: ZoneSetting, value: &str) -> Result<(), SettingError> {
        let invalid = |reason: &str| SettingError::InvalidValue {
            setting: setting.to_string(),
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        if setting == ZoneSetting::Dnssec {
            self.dnssec = parse_bool(value).ok_or_else(|| {
                invalid("expected one of y, yes, true, on, 1, n, no, false, off, 0")
            })?;
            return Ok(());
        }

        let number = value
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid("expected a positive integer"))?;
        match setting {
            ZoneSetting::Ttl => self.ttl = number,
            ZoneSetting::Refresh => self.refresh = number,
            ZoneSetting::Retry => self.retry = number,
            ZoneSetting::Expire => self.expire = number,
            ZoneSetting::Dnssec => {}
        }
        Ok(())
    }

    /// Current value of `setting` in DSL notation.
    pub fn value(&self, setting: ZoneSetting) -> String {
        match setting {
            ZoneSetting::Ttl => self.ttl.to_string(),
            ZoneSetting::Refresh => self.refresh.to_string(),
            ZoneSetting::Retry => self.retry.to_string(),
            ZoneSetting::Expire => self.expire.to_string(),
            ZoneSetting::Dnssec => if self.dnssec { "yes" } else { "no" }.to_owned(),
        }
    }

    /// Settings whose value differs from the provider default, in canonical order.
    pub fn non_default(&self) -> Vec<ZoneSetting> {
        let defaults = Self::default();
        [
            ZoneSetting::Ttl,
            ZoneSetting::Refresh,
            ZoneSetting::Retry,
            ZoneSetting::Expire,
            ZoneSetting::Dnssec,
        ]
        .into_iter()
        .filter(|s| self.value(*s) != defaults.value(*s))
        .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for ZoneSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TTL {}, Refresh {}, Retry {}, Expire {}, DNSSEC {}",
            self.ttl,
            self.refresh,
            self.retry,
            self.expire,
            if self.dnssec { "on" } else { "off" }
        )
    }
}

/// One DNS zone: its settings plus the records declared for it.
///
/// `serial` is only ever filled in from the provider and is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub domain: String,
    pub settings: ZoneSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<u64>,
    pub entries: Vec<Record>,
}

impl Zone {
    pub fn new(domain: impl Into<String>, settings: ZoneSettings) -> Self {
        Self {
            domain: domain.into(),
            settings,
            serial: None,
            entries: Vec::new(),
        }
    }
}
