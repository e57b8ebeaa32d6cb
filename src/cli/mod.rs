// src/cli/mod.rs

pub mod handler;

use crate::utils::Config;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line interface definition for lightaudit.
#[derive(Parser, Debug)]
#[command(name = "lightaudit")]
#[command(about = "Run Lighthouse audits, keep JSON reports and compare runs over time")]
#[command(version)]
pub struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Audit one or more URLs and save a JSON report per URL
    Audit(AuditArgs),
    /// Compare two saved reports
    Compare(CompareArgs),
    /// Show saved reports from the last days
    History(HistoryArgs),
    /// Write a Lighthouse CI config and create the report directory
    Init(InitArgs),
    /// Submit URLs to the hosted audit API
    Hosted(HostedArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Comma separated URLs (default: LIGHTAUDIT_URL)
    #[arg(long)]
    pub urls: Option<String>,

    /// File with one URL per line
    #[arg(long, conflicts_with = "urls")]
    pub urls_file: Option<PathBuf>,

    /// Report directory (default: LIGHTAUDIT_OUTPUT_DIR)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model used for the analysis (needs LIGHTAUDIT_AI_ENDPOINT)
    #[arg(long)]
    pub model: Option<String>,

    /// Format of the batch summary file
    #[arg(long, value_enum, default_value = "json")]
    pub format: ReportFormat,

    /// Fail when performance or accessibility is below 90
    #[arg(long)]
    pub ci: bool,

    /// Compare each result with the previous report for the same URL
    #[arg(long)]
    pub compare: bool,

    /// Extra attempts per URL
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Html,
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Newer report file
    #[arg(long)]
    pub current: PathBuf,

    /// Older report file
    #[arg(long)]
    pub previous: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// How many days back to look
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    #[arg(long, value_enum, default_value = "table")]
    pub format: HistoryFormat,

    /// Report directory (default: LIGHTAUDIT_OUTPUT_DIR)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only reports for this URL
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Table,
    Json,
    Chart,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Report directory to create (default: LIGHTAUDIT_OUTPUT_DIR)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where to write the Lighthouse CI config
    #[arg(long, default_value = "lighthouserc.json")]
    pub config: PathBuf,

    /// Comma separated URLs to collect (default: LIGHTAUDIT_URL)
    #[arg(long)]
    pub urls: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct HostedArgs {
    /// Comma separated URLs (default: LIGHTAUDIT_URL)
    #[arg(long)]
    pub urls: Option<String>,

    /// Comma separated test regions
    #[arg(long, default_value = "us-east")]
    pub regions: String,
}

/// Runs a command and returns the process exit code.
pub async fn run(command: Command, config: &Config) -> anyhow::Result<i32> {
    match command {
        Command::Audit(args) => handler::audit::run_audit(args, config).await,
        Command::Compare(args) => handler::compare::run_compare(args).await,
        Command::History(args) => handler::history::run_history(args, config).await,
        Command::Init(args) => handler::init::run_init(args, config).await,
        Command::Hosted(args) => handler::hosted::run_hosted(args, config).await,
    }
}
