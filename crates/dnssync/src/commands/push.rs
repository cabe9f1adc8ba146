//! `dnssync push`: show, and with `--commit` apply, the changes a layout implies.
//!
//! Every domain is reconciled first and the diff printed. Only then, and
//! only for domains that actually differ, are the deltas written, so what
//! is confirmed is exactly what gets applied.

use serde::Serialize;

use dnssync_core::{DomainOutcome, Syncer, ZoneDelta};

use crate::cli::{GlobalOpts, OutputFormat, PushArgs};
use crate::commands::util;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct DomainReport<'a> {
    domain: &'a str,
    committed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    delta: Option<&'a ZoneDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn handle(
    args: &PushArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let layout = util::load_layouts(&args.files, &args.domains)?;
    if layout.is_empty() {
        tracing::warn!("layout declares no zones, nothing to push");
        return Ok(());
    }

    let syncer = Syncer::new(&settings.sync_config()?)?;
    syncer.connect().await?;
    let mut outcomes = syncer.push_layout(&layout, false).await;

    let color = output::should_color(settings.color(global));
    let pending = outcomes
        .iter()
        .filter(|o| o.result.as_ref().is_ok_and(|d| !d.is_noop()))
        .count();

    if global.output == OutputFormat::Dsl {
        let diff = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .filter(|d| !d.is_noop())
            .map(|d| output::render_diff(d, color))
            .collect::<Vec<_>>()
            .join("\n");
        output::print_output(&diff, global.quiet);
    }

    let mut committed = false;
    if args.commit && pending > 0 {
        let prompt = format!("Apply changes to {pending} domain(s)?");
        match util::confirm(&prompt, args.yes) {
            Ok(true) => {
                apply(&syncer, &mut outcomes).await;
                committed = true;
            }
            Ok(false) => eprintln!("Aborted, nothing was changed."),
            Err(e) => {
                syncer.disconnect().await;
                return Err(e);
            }
        }
    }
    syncer.disconnect().await;

    report(&outcomes, committed, global)?;
    if !args.commit && pending > 0 && !global.quiet {
        eprintln!("Dry run, rerun with --commit to apply.");
    }
    finish(outcomes)
}

/// Write every non-empty delta, turning the outcome into an error on failure.
async fn apply(syncer: &Syncer, outcomes: &mut [DomainOutcome]) {
    for outcome in outcomes.iter_mut() {
        let Ok(delta) = &outcome.result else { continue };
        if delta.is_noop() {
            continue;
        }
        let applied = syncer.apply_delta(delta).await;
        if let Err(e) = applied {
            tracing::warn!(domain = %outcome.domain, error = %e, "applying delta failed");
            outcome.result = Err(e);
        } else {
            tracing::info!(domain = %outcome.domain, "changes applied");
        }
    }
}

fn report(outcomes: &[DomainOutcome], committed: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = match global.output {
        OutputFormat::Dsl => output::render_summary(outcomes, committed),
        format => {
            let reports: Vec<DomainReport<'_>> = outcomes
                .iter()
                .map(|o| DomainReport {
                    domain: &o.domain,
                    committed: committed && o.result.is_ok(),
                    delta: o.result.as_ref().ok(),
                    error: o.result.as_ref().err().map(ToString::to_string),
                })
                .collect();
            if format == OutputFormat::Json {
                output::render_json_pretty(&reports)?
            } else {
                output::render_yaml(&reports)?
            }
        }
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// A lone failing domain surfaces its own error; otherwise count failures.
fn finish(outcomes: Vec<DomainOutcome>) -> Result<(), CliError> {
    let total = outcomes.len();
    let mut failures: Vec<_> = outcomes.into_iter().filter_map(|o| o.result.err()).collect();
    match (failures.pop(), failures.len(), total) {
        (None, ..) => Ok(()),
        (Some(err), 0, 1) => Err(err.into()),
        (Some(_), rest, total) => Err(CliError::PartialFailure {
            failed: rest + 1,
            total,
        }),
    }
}
