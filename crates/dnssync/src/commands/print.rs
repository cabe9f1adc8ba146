//! `dnssync print`: parse layout files and render them canonically.

use dnssync_core::PrintOptions;

use crate::cli::{GlobalOpts, PrintArgs};
use crate::commands::util;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &PrintArgs, settings: &Settings, global: &GlobalOpts) -> Result<(), CliError> {
    let layout = util::load_layouts(&args.files, &args.domains)?;
    let options = PrintOptions {
        sort_records: args.sort_records || settings.config.sort_records,
    };
    let rendered = output::render_layout_as(global.output, &layout, options)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
