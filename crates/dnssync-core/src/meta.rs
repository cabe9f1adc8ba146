// ── Meta directives ──
//
// A zone's body is a mix of plain records and directives that edit the
// records declared before them. `process` folds that list into the final
// record set in a single left-to-right pass.

use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumString, VariantNames};

use crate::error::DirectiveError;
use crate::model::{Record, RecordType};

/// What a directive does to the records accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum DirectiveAction {
    /// Drop every accumulated record matching the pattern.
    RemoveRecord,
}

impl DirectiveAction {
    pub fn parse(name: &str) -> Result<Self, DirectiveError> {
        Self::from_str(name).map_err(|_| DirectiveError::UnknownAction {
            name: name.to_owned(),
            valid: Self::VARIANTS.join(", "),
        })
    }
}

/// Partial record match. `None` fields are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPattern {
    pub record_type: Option<RecordType>,
    pub hostname: Option<String>,
    pub destination: Option<String>,
}

impl RecordPattern {
    pub fn matches(&self, record: &Record) -> bool {
        self.record_type.is_none_or(|t| t == record.record_type())
            && self
                .hostname
                .as_deref()
                .is_none_or(|h| h == record.hostname())
            && self
                .destination
                .as_deref()
                .is_none_or(|d| d == record.destination())
    }

    /// Build a pattern from `key=value` tokens.
    pub fn from_filters<'a>(
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, DirectiveError> {
        let mut pattern = Self::default();
        for token in tokens {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| DirectiveError::MalformedFilter {
                    token: token.to_owned(),
                })?;
            let duplicate = || DirectiveError::DuplicateFilter {
                key: key.to_owned(),
            };
            match key {
                "type" => {
                    if pattern.record_type.is_some() {
                        return Err(duplicate());
                    }
                    pattern.record_type = Some(RecordType::parse(value)?);
                }
                "hostname" => {
                    if pattern.hostname.replace(value.to_owned()).is_some() {
                        return Err(duplicate());
                    }
                }
                "destination" => {
                    if pattern.destination.replace(value.to_owned()).is_some() {
                        return Err(duplicate());
                    }
                }
                other => {
                    return Err(DirectiveError::UnknownFilter {
                        key: other.to_owned(),
                    });
                }
            }
        }
        Ok(pattern)
    }
}

impl fmt::Display for RecordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(t) = self.record_type {
            parts.push(format!("type={t}"));
        }
        if let Some(h) = &self.hostname {
            parts.push(format!("hostname={h}"));
        }
        if let Some(d) = &self.destination {
            parts.push(format!("destination={d}"));
        }
        if parts.is_empty() {
            f.write_str("*")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub action: DirectiveAction,
    pub pattern: RecordPattern,
}

impl Directive {
    pub fn remove(pattern: RecordPattern) -> Self {
        Self {
            action: DirectiveAction::RemoveRecord,
            pattern,
        }
    }

    fn apply(&self, records: &mut Vec<Record>) {
        match self.action {
            DirectiveAction::RemoveRecord => {
                let before = records.len();
                records.retain(|r| !self.pattern.matches(r));
                tracing::trace!(
                    pattern = %self.pattern,
                    removed = before - records.len(),
                    "applied remove-record"
                );
            }
        }
    }
}

/// One item of a zone body before meta processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Record(Record),
    Directive(Directive),
}

/// Resolve directives against the records declared before them.
pub fn process(entries: impl IntoIterator<Item = Entry>) -> Vec<Record> {
    let mut records = Vec::new();
    for entry in entries {
        match entry {
            Entry::Record(record) => records.push(record),
            Entry::Directive(directive) => directive.apply(&mut records),
        }
    }
    records
}
