//! `dnssync pull`: fetch live zones and print them.

use dnssync_core::{PrintOptions, Syncer};

use crate::cli::{GlobalOpts, PullArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    args: &PullArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let domains = args.domains.as_slice();
    let layout = Syncer::oneshot(&settings.sync_config()?, |s| async move {
        s.fetch_layout(domains).await
    })
    .await?;

    let options = PrintOptions {
        sort_records: args.sort_records || settings.config.sort_records,
    };
    let rendered = output::render_layout_as(global.output, &layout, options)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
