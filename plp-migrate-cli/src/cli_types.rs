//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use plp_migrate_lib::{CollisionPolicy, ContentFormat, Expectation};

#[derive(Parser)]
#[command(name = "plp-migrate")]
#[command(about = "Migrate product listing page content into a collections export", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/plp-migrate/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write new PLP content into the matching collections
    Migrate(MigrateArgs),

    /// Compare an updated export with the original and report coverage
    Analyze(AnalyzeArgs),

    /// List storefront URLs for the collections in an export
    Urls(UrlsArgs),

    /// Spot-check collection titles and content in an updated export
    Check(CheckArgs),

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub(crate) struct MigrateArgs {
    /// Source content CSV (URL, Title, Description, ...)
    #[arg(short, long)]
    pub source: PathBuf,

    /// Target collections export CSV
    #[arg(short, long)]
    pub target: PathBuf,

    /// Where to write the updated export
    #[arg(short, long, required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Match and render without writing any output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Fail on the first malformed source URL instead of skipping it
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub matching: MatchingArgs,

    /// Save a migration report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Matching and rendering overrides shared by `migrate` and `analyze`.
#[derive(Args)]
pub(crate) struct MatchingArgs {
    /// Which source wins when two URLs give the same handle (last-wins, first-wins)
    #[arg(long)]
    pub policy: Option<CollisionPolicy>,

    /// URL suffix stripped from the last path segment (e.g., .html)
    #[arg(long)]
    pub suffix: Option<String>,

    /// How description text is treated (auto, html, text)
    #[arg(long)]
    pub description_format: Option<ContentFormat>,
}

#[derive(Args)]
pub(crate) struct AnalyzeArgs {
    /// Source content CSV used for the migration
    #[arg(short, long)]
    pub source: PathBuf,

    /// Original collections export
    #[arg(long)]
    pub original: PathBuf,

    /// Updated collections export
    #[arg(long)]
    pub updated: PathBuf,

    /// Storefront base URL for collection links
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub matching: MatchingArgs,

    /// Maximum number of entries to show per section
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Save the full report to this file
    #[arg(long)]
    pub save_report: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct UrlsArgs {
    /// Collections export CSV
    #[arg(short, long)]
    pub target: PathBuf,

    /// Storefront base URL for collection links
    #[arg(long)]
    pub base_url: Option<String>,

    /// List every row, including repeated handles
    #[arg(long)]
    pub all: bool,

    /// Maximum number of URLs to list
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Save the URL list to this file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Updated collections export CSV
    #[arg(short, long)]
    pub updated: PathBuf,

    /// Expected title, as handle=Expected Title (repeatable)
    #[arg(short, long = "expect", required = true)]
    pub expectations: Vec<Expectation>,

    /// Storefront base URL for collection links
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
