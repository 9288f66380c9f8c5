//! Clap derive structures for the `mrs` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mrs -- CLI for the MercariSearcher dashboard backend
#[derive(Debug, Parser)]
#[command(
    name = "mrs",
    version,
    about = "Inspect and control a MercariSearcher backend from the command line",
    long_about = "A CLI companion to the MercariSearcher dashboard.\n\n\
        Reads the same JSON API the dashboard polls (stats, recent items,\n\
        saved queries) and triggers the same one-shot actions (test a search\n\
        URL, force a scan, send a test notification, clear items).",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "MRS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 's', env = "MRS_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MRS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "MRS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
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
    /// Show the dashboard counters (items, searches, API requests, uptime)
    #[command(alias = "st")]
    Stats,

    /// List the most recently discovered items
    #[command(alias = "i")]
    Items(ItemsArgs),

    /// Manage saved search queries
    #[command(alias = "q")]
    Queries(QueriesArgs),

    /// Validate a search URL and dry-run it against the backend
    TestUrl(TestUrlArgs),

    /// Force a scan cycle outside the backend's schedule
    Scan,

    /// Send a test notification through the configured channel
    NotifyTest,

    /// Delete every stored item (asks twice)
    ClearItems,

    /// Manage the mrs configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-command args ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ItemsArgs {
    /// Maximum number of items to show
    #[arg(long, short = 'n', default_value = "30")]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct QueriesArgs {
    #[command(subcommand)]
    pub command: QueriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum QueriesCommand {
    /// List all saved queries
    #[command(alias = "ls")]
    List,

    /// Enable or disable a saved query
    Toggle {
        /// Query id (see `mrs queries list`)
        id: i64,
    },

    /// Delete a saved query (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Query id (see `mrs queries list`)
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct TestUrlArgs {
    /// The Mercari search URL to test
    pub url: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective configuration
    Show,

    /// Create or update a profile
    Init {
        /// Backend base URL for the profile
        #[arg(long)]
        server: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
