//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use dnssync_core::{Layout, parse_layout};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read one layout source; `-` is stdin.
fn read_source(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    };
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(read_err)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(read_err)
    }
}

/// Parse every file into one layout, then keep only `domains` (all if empty).
///
/// Files are parsed independently. A zone declared in a later file replaces
/// the earlier declaration but keeps its position; each replacement is
/// logged as a warning.
pub fn load_layouts(files: &[impl AsRef<Path>], domains: &[String]) -> Result<Layout, CliError> {
    let mut layout = Layout::new();
    for file in files {
        let path = file.as_ref();
        let text = read_source(path)?;
        let parsed = parse_layout(&text).map_err(|error| CliError::Layout {
            source_name: path.display().to_string(),
            error,
        })?;
        tracing::debug!(file = %path.display(), zones = parsed.len(), "parsed layout");
        for domain in parsed.domains().filter(|d| layout.get(d).is_some()) {
            tracing::warn!(
                file = %path.display(),
                domain,
                "zone declared again, replaces the earlier declaration"
            );
        }
        layout.extend(parsed);
    }
    Ok(layout.filter_domains(domains))
}
