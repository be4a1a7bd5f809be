//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    aircraft::AircraftArgs, completions::CompletionsArgs, init::InitArgs, report::ReportArgs,
    table::TableArgs,
};

#[derive(Parser)]
#[command(name = "wnb")]
#[command(author, version, about = "Cessna 172S weight and balance")]
#[command(long_about = "Computes weight, moment and centre of gravity for a calibrated Cessna 172S \
and renders a one-page load sheet with the envelope chart.\n\n\
Run without arguments to build the report from weight_and_balance.json in the current directory.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Load sheet (default: weight_and_balance.json)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the weight and balance report (default)
    Report(ReportArgs),

    /// Print the weight and balance table
    Table(TableArgs),

    /// List calibrated aircraft
    Aircraft(AircraftArgs),

    /// Write an example load sheet
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Boxed table for the terminal
    #[default]
    Table,
    /// Markdown table
    Md,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
}
