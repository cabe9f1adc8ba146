//! Clap derive structures for the `dnssync` CLI.
//!
//! Defines the command tree, global flags, and shared types. Also compiled
//! by `build.rs` for man page generation, so it may only depend on clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dnssync -- keep netcup DNS zones in sync with a layout file
#[derive(Debug, Parser)]
#[command(
    name = "dnssync",
    version,
    about = "Synchronize DNS zones with the netcup DNS API",
    long_about = "Declare DNS zones in a tab-indented layout file, print them in\n\
        canonical form, pull the live zones from netcup, and push the\n\
        difference back. Pushing is a dry run unless --commit is given.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Credentials file (JSON with customer, api_key, api_password)
    #[arg(long, short = 'c', env = "DNSSYNC_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, env = "DNSSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "dsl", global = true)]
    pub output: OutputFormat,

    /// When to use color output (defaults to the config file setting)
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (defaults to the config file setting)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Canonical layout text (default)
    Dsl,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse layout files and print them in canonical form
    Print(PrintArgs),

    /// Fetch zones from netcup and print them
    Pull(PullArgs),

    /// Show (and with --commit apply) the changes a layout implies
    Push(PushArgs),

    /// Inspect CLI configuration and store secrets
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Rendered layout file(s); `-` reads stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Only print these domains (repeatable)
    #[arg(long = "domain", short = 'd', value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Print records sorted instead of in declaration order
    #[arg(long, short = 's')]
    pub sort_records: bool,
}

#[derive(Debug, Args)]
pub struct PullArgs {
    /// Domains to fetch
    #[arg(required = true)]
    pub domains: Vec<String>,

    /// Print records sorted instead of in provider order
    #[arg(long, short = 's')]
    pub sort_records: bool,
}

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Rendered layout file(s); `-` reads stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Only push these domains (repeatable)
    #[arg(long = "domain", short = 'd', value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Apply the changes after a confirmation prompt (non-interactive runs need -y)
    #[arg(long, short = 'C')]
    pub commit: bool,

    /// Skip the confirmation prompt before committing
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Store the API password in the system keyring
    SetPassword {
        /// Customer number (defaults to the one in the credentials file)
        #[arg(long)]
        customer: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
