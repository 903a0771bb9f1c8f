//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use assetscope_domain::SortKey;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AssetScope CLI - Extract equipment inventories from PDF documents.
#[derive(Debug, Parser)]
#[command(name = "assetscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract assets from one or more PDF files
    Analyze(AnalyzeArgs),

    /// Show or change CLI configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// PDF files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Column to sort by (assetId, type, model, serialNumber, location)
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Sort descending instead of ascending
    #[arg(short, long)]
    pub descending: bool,

    /// Browse the results interactively after processing
    #[arg(short, long)]
    pub interactive: bool,

    /// Forwarder URL (overrides the configured endpoint)
    #[arg(short, long, env = "ASSETSCOPE_ENDPOINT")]
    pub endpoint: Option<String>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,

    /// Set the forwarder URL
    SetEndpoint {
        /// Forwarder base URL (e.g., http://localhost:3000)
        url: String,
    },
}
