//! Output formatting: layout text, JSON, YAML, diffs and push summaries.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use dnssync_core::{DomainOutcome, Layout, PrintOptions, ZoneDelta, render_layout};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Layouts ──────────────────────────────────────────────────────────

/// Render a layout in the chosen format.
///
/// `dsl` produces text that parses back to the same layout; the structured
/// formats serialize the zone model, record ids and serials included.
pub fn render_layout_as(
    format: OutputFormat,
    layout: &Layout,
    options: PrintOptions,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Dsl => Ok(render_layout(layout, options).trim_end().to_owned()),
        OutputFormat::Json => render_json_pretty(layout),
        OutputFormat::Yaml => render_yaml(layout),
    }
}

/// Pretty-printed JSON.
pub fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Serialization(e.to_string()))
}

pub fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Serialization(e.to_string()))
}

// ── Diffs ────────────────────────────────────────────────────────────

/// Unified-style listing of one zone's delta.
///
/// ```text
/// -zone example.com: TTL 86400, Refresh 28800, ...
/// +zone example.com: TTL 300, Refresh 28800, ...
/// -example.com A     old -> 9.9.9.9
/// +example.com A     new -> 8.8.8.8
/// ```
pub fn render_diff(delta: &ZoneDelta, color: bool) -> String {
    let mut lines = Vec::new();
    if let Some(change) = &delta.settings {
        lines.push(removed(&format!("-zone {}: {}", delta.domain, change.old), color));
        lines.push(added(&format!("+zone {}: {}", delta.domain, change.new), color));
    }
    for record in &delta.removed {
        lines.push(removed(&format!("-{} {record}", delta.domain), color));
    }
    for record in &delta.added {
        lines.push(added(&format!("+{} {record}", delta.domain), color));
    }
    lines.join("\n")
}

fn removed(line: &str, color: bool) -> String {
    if color {
        line.red().to_string()
    } else {
        line.to_owned()
    }
}

fn added(line: &str, color: bool) -> String {
    if color {
        line.green().to_string()
    } else {
        line.to_owned()
    }
}

// ── Push summary ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Settings")]
    settings: String,
    #[tabled(rename = "Removed")]
    removed: usize,
    #[tabled(rename = "Added")]
    added: usize,
}

impl OutcomeRow {
    fn new(outcome: &DomainOutcome, committed: bool) -> Self {
        match &outcome.result {
            Ok(delta) => Self {
                domain: outcome.domain.clone(),
                status: if delta.is_noop() {
                    "up to date".into()
                } else if committed {
                    "updated".into()
                } else {
                    "pending".into()
                },
                settings: if delta.settings.is_some() { "changed" } else { "-" }.into(),
                removed: delta.removed.len(),
                added: delta.added.len(),
            },
            Err(e) => Self {
                domain: outcome.domain.clone(),
                status: format!("failed: {e}"),
                settings: "-".into(),
                removed: 0,
                added: 0,
            },
        }
    }
}

/// One table row per domain.
pub fn render_summary(outcomes: &[DomainOutcome], committed: bool) -> String {
    let rows: Vec<OutcomeRow> = outcomes
        .iter()
        .map(|o| OutcomeRow::new(o, committed))
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dnssync_core::{CoreError, Record, RecordType, SettingsChange, ZoneSettings};

    use super::*;

    fn a(host: &str, dest: &str) -> Record {
        Record::new(RecordType::A, host, dest, None).unwrap()
    }

    #[test]
    fn diff_lists_settings_then_removals_then_additions() {
        let old = ZoneSettings::default();
        let new = ZoneSettings {
            ttl: 300,
            ..old
        };
        let delta = ZoneDelta {
            domain: "example.com".into(),
            settings: Some(SettingsChange { old, new }),
            removed: vec![a("old", "9.9.9.9")],
            added: vec![a("new", "8.8.8.8")],
        };
        let text = render_diff(&delta, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("-zone example.com: TTL 86400"));
        assert!(lines[1].starts_with("+zone example.com: TTL 300"));
        assert!(lines[2].starts_with("-example.com A"));
        assert!(lines[2].ends_with("old -> 9.9.9.9"));
        assert!(lines[3].starts_with("+example.com A"));
    }

    #[test]
    fn uncolored_diff_has_no_escape_codes() {
        let delta = ZoneDelta {
            domain: "example.com".into(),
            settings: None,
            removed: vec![a("old", "9.9.9.9")],
            added: vec![],
        };
        assert!(!render_diff(&delta, false).contains('\u{1b}'));
        assert!(render_diff(&delta, true).contains('\u{1b}'));
    }

    #[test]
    fn summary_reports_failures_per_domain() {
        let outcomes = vec![
            DomainOutcome {
                domain: "example.com".into(),
                result: Ok(ZoneDelta {
                    domain: "example.com".into(),
                    settings: None,
                    removed: vec![],
                    added: vec![a("www", "1.2.3.4")],
                }),
            },
            DomainOutcome {
                domain: "missing.example".into(),
                result: Err(CoreError::Timeout),
            },
        ];
        let table = render_summary(&outcomes, false);
        assert!(table.contains("pending"));
        assert!(table.contains("failed: Request timed out"));
    }

    #[test]
    fn dsl_output_has_no_trailing_newline() {
        let layout = dnssync_core::parse_layout("example.com\n\tA\twww\t1.2.3.4\n").unwrap();
        let text =
            render_layout_as(OutputFormat::Dsl, &layout, PrintOptions::default()).unwrap();
        assert_eq!(text, "example.com\n\tA\twww\t1.2.3.4");
        let json =
            render_layout_as(OutputFormat::Json, &layout, PrintOptions::default()).unwrap();
        assert!(json.contains("\"domain\": \"example.com\""));
    }
}
