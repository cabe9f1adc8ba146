// ── Resource records ──
//
// A `Record` is an immutable value. Equality, hashing and ordering cover
// (type, hostname, destination, priority) only: the provider-assigned
// `RecordId` rides along but never makes two records different.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumString, VariantNames};

use crate::error::RecordError;

// ── RecordType ──────────────────────────────────────────────────────

/// Record types accepted by the provider.
///
/// Declaration order is the sort order used by the printer and the
/// reconciler's removal list; it is deliberately not alphabetical.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    VariantNames,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
    Caa,
    Srv,
    Tlsa,
    Ds,
    Sshfp,
    Openpgpkey,
    Smimea,
}

impl RecordType {
    /// Parse a type name (case-insensitive), listing the valid names on failure.
    pub fn parse(name: &str) -> Result<Self, RecordError> {
        Self::from_str(name).map_err(|_| RecordError::UnknownType {
            name: name.to_owned(),
            valid: Self::VARIANTS.join(", "),
        })
    }
}

// ── RecordId ────────────────────────────────────────────────────────

/// Opaque identifier the provider assigns to a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Record ──────────────────────────────────────────────────────────

/// One resource record.
///
/// Construct through [`Record::new`], which enforces the shape rules:
/// a priority is present exactly for MX records, A / AAAA destinations
/// must be IPv4 / IPv6 addresses, and hostname and destination must each
/// survive as a single layout token.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    #[serde(rename = "type")]
    record_type: RecordType,
    hostname: String,
    destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
}

impl Record {
    /// Build a validated record without a provider id.
    pub fn new(
        record_type: RecordType,
        hostname: impl Into<String>,
        destination: impl Into<String>,
        priority: Option<u16>,
    ) -> Result<Self, RecordError> {
        let record = Self {
            record_type,
            hostname: hostname.into(),
            destination: destination.into(),
            priority,
            id: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// The same record, tagged with the id the provider stored it under.
    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn validate(&self) -> Result<(), RecordError> {
        check_token("hostname", &self.hostname)?;
        check_token("destination", &self.destination)?;

        match (self.record_type, self.priority) {
            (RecordType::Mx, None) => return Err(RecordError::MissingPriority),
            (RecordType::Mx, Some(_)) | (_, None) => {}
            (record_type, Some(_)) => {
                return Err(RecordError::UnexpectedPriority { record_type });
            }
        }

        let family_ok = match self.record_type {
            RecordType::A => self.destination.parse::<Ipv4Addr>().is_ok(),
            RecordType::Aaaa => self.destination.parse::<Ipv6Addr>().is_ok(),
            _ => true,
        };
        if !family_ok {
            return Err(RecordError::AddressFamily {
                record_type: self.record_type,
                destination: self.destination.clone(),
                family: if self.record_type == RecordType::A {
                    "IPv4"
                } else {
                    "IPv6"
                },
            });
        }
        Ok(())
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn priority(&self) -> Option<u16> {
        self.priority
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// The content that defines record identity.
    fn key(&self) -> (RecordType, &str, &str, Option<u16>) {
        (
            self.record_type,
            &self.hostname,
            &self.destination,
            self.priority,
        )
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Non-empty, no edge whitespace, no tab or line break.
fn check_token(field: &'static str, value: &str) -> Result<(), RecordError> {
    let representable = !value.is_empty()
        && value.trim() == value
        && !value.contains(['\t', '\r', '\n']);
    if representable {
        Ok(())
    } else {
        Err(RecordError::NotAToken {
            field,
            value: value.to_owned(),
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.record_type.to_string();
        write!(f, "{kind:<5} {} -> {}", self.hostname, self.destination)?;
        if let Some(priority) = self.priority {
            write!(f, " priority {priority}")?;
        }
        Ok(())
    }
}
