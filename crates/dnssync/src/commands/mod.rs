//! Command dispatch: bridges CLI args to the core and output formatting.

pub mod config_cmd;
pub mod print;
pub mod pull;
pub mod push;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Settings;
use crate::error::CliError;

pub async fn dispatch(
    cmd: Command,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Print(args) => print::handle(&args, settings, global),
        Command::Pull(args) => pull::handle(&args, settings, global).await,
        Command::Push(args) => push::handle(&args, settings, global).await,
        Command::Config(args) => config_cmd::handle(args, settings, global),
        Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}
