// ── Layout DSL parser ──
//
// Line-oriented, tab-indented. Each line is classified by its
// (indent, token count) shape against an ordered table; the first shape
// that matches handles the line. All state lives in a `ParseState` that is
// created per call, so defaults never leak from one parse into the next.
//
//     .ttl        3600            <- default for zones declared below
//     example.com                 <- open (or re-open) a zone
//         .dnssec yes             <- override on the open zone
//         A       www     192.0.2.1
//         MX      @       mx.example.com  10
//         !remove-record  hostname=www

use indexmap::IndexMap;
use tracing::trace;

use crate::error::LayoutError;
use crate::meta::{self, Directive, DirectiveAction, Entry, RecordPattern};
use crate::model::{Layout, Record, RecordType, Zone, ZoneSetting, ZoneSettings};

/// Parse fully rendered layout text.
///
/// The whole text is rejected on the first bad line; no partial layout is
/// ever returned.
pub fn parse_layout(text: &str) -> Result<Layout, LayoutError> {
    let mut state = ParseState::default();
    for (index, raw) in text.lines().enumerate() {
        let line = Line::split(index + 1, raw);
        if line.is_comment() {
            continue;
        }
        let shape = SHAPES
            .iter()
            .find(|shape| (shape.matches)(&line))
            .ok_or_else(|| LayoutError::Syntax {
                line: line.number,
                content: line.content.to_owned(),
            })?;
        trace!(line = line.number, shape = shape.name, "layout line");
        (shape.apply)(&mut state, &line)?;
    }
    Ok(state.finish())
}

// ── Lines ───────────────────────────────────────────────────────────

struct Line<'a> {
    number: usize,
    content: &'a str,
    indent: usize,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn split(number: usize, raw: &'a str) -> Self {
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        let body = content.trim_start_matches('\t');
        let indent = content.len() - body.len();
        let tokens = body
            .split('\t')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            number,
            content,
            indent,
            tokens,
        }
    }

    fn is_comment(&self) -> bool {
        self.content.trim_start().starts_with('#')
    }

    fn first(&self) -> &'a str {
        self.tokens.first().copied().unwrap_or_default()
    }

    fn configuration(&self, reason: impl ToString) -> LayoutError {
        LayoutError::Configuration {
            line: self.number,
            content: self.content.to_owned(),
            reason: reason.to_string(),
        }
    }
}

// ── State ───────────────────────────────────────────────────────────

#[derive(Default)]
struct PendingZone {
    settings: ZoneSettings,
    entries: Vec<Entry>,
}

#[derive(Default)]
struct ParseState {
    defaults: ZoneSettings,
    current: Option<String>,
    zones: IndexMap<String, PendingZone>,
}

impl ParseState {
    fn open_zone(&mut self, line: &Line<'_>) -> Result<&mut PendingZone, LayoutError> {
        self.current
            .as_ref()
            .and_then(|domain| self.zones.get_mut(domain))
            .ok_or_else(|| line.configuration("no zone is open at this point"))
    }

    fn push_entry(&mut self, line: &Line<'_>, entry: Entry) -> Result<(), LayoutError> {
        self.open_zone(line)?.entries.push(entry);
        Ok(())
    }

    fn finish(self) -> Layout {
        self.zones
            .into_iter()
            .map(|(domain, pending)| {
                let mut zone = Zone::new(domain, pending.settings);
                zone.entries = meta::process(pending.entries);
                zone
            })
            .collect()
    }
}

// ── Shapes ──────────────────────────────────────────────────────────

struct Shape {
    name: &'static str,
    matches: fn(&Line<'_>) -> bool,
    apply: fn(&mut ParseState, &Line<'_>) -> Result<(), LayoutError>,
}

/// Tried top to bottom; the first match wins.
const SHAPES: &[Shape] = &[
    Shape {
        name: "blank",
        matches: |l| l.tokens.is_empty(),
        apply: |_, _| Ok(()),
    },
    Shape {
        name: "default",
        matches: |l| l.indent == 0 && l.tokens.len() == 2 && l.first().starts_with('.'),
        apply: apply_default,
    },
    Shape {
        name: "zone",
        matches: |l| l.indent == 0 && l.tokens.len() == 1 && !l.first().starts_with('.'),
        apply: apply_zone,
    },
    Shape {
        name: "override",
        matches: |l| l.indent == 1 && l.tokens.len() == 2 && l.first().starts_with('.'),
        apply: apply_override,
    },
    Shape {
        name: "directive",
        matches: |l| l.indent == 1 && l.first().starts_with('!'),
        apply: apply_directive,
    },
    Shape {
        name: "record",
        matches: |l| l.indent == 1 && l.tokens.len() == 3,
        apply: apply_record,
    },
    Shape {
        name: "record-with-priority",
        matches: |l| l.indent == 1 && l.tokens.len() == 4,
        apply: apply_record,
    },
];

fn setting_assignment(
    settings: &mut ZoneSettings,
    line: &Line<'_>,
) -> Result<(), LayoutError> {
    let name = line.first().trim_start_matches('.');
    let setting = ZoneSetting::parse(name).map_err(|e| line.configuration(e))?;
    settings
        .set(setting, line.tokens[1])
        .map_err(|e| line.configuration(e))
}

fn apply_default(state: &mut ParseState, line: &Line<'_>) -> Result<(), LayoutError> {
    setting_assignment(&mut state.defaults, line)
}

fn apply_zone(state: &mut ParseState, line: &Line<'_>) -> Result<(), LayoutError> {
    let domain = line.first();
    if domain.contains(char::is_whitespace) {
        return Err(line.configuration(format!(
            "domain name '{domain}' must not contain whitespace"
        )));
    }
    let defaults = state.defaults;
    state
        .zones
        .entry(domain.to_owned())
        .or_insert_with(|| PendingZone {
            settings: defaults,
            entries: Vec::new(),
        });
    state.current = Some(domain.to_owned());
    Ok(())
}

fn apply_override(state: &mut ParseState, line: &Line<'_>) -> Result<(), LayoutError> {
    let zone = state.open_zone(line)?;
    setting_assignment(&mut zone.settings, line)
}

fn apply_directive(state: &mut ParseState, line: &Line<'_>) -> Result<(), LayoutError> {
    let action = DirectiveAction::parse(line.first().trim_start_matches('!'))
        .map_err(|e| line.configuration(e))?;
    let pattern = RecordPattern::from_filters(line.tokens[1..].iter().copied())
        .map_err(|e| line.configuration(e))?;
    state.push_entry(line, Entry::Directive(Directive { action, pattern }))
}

fn apply_record(state: &mut ParseState, line: &Line<'_>) -> Result<(), LayoutError> {
    let record_type = RecordType::parse(line.tokens[0]).map_err(|e| line.configuration(e))?;
    let priority = line
        .tokens
        .get(3)
        .map(|p| {
            p.parse::<u16>().map_err(|_| {
                line.configuration(format!("priority '{p}' is not an integer in 0..=65535"))
            })
        })
        .transpose()?;
    let record = Record::new(record_type, line.tokens[1], line.tokens[2], priority)
        .map_err(|e| line.configuration(e))?;
    state.push_entry(line, Entry::Record(record))
}
