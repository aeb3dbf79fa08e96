//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, mat::MatCommands, measure::MeasureCommands, part::PartCommands,
    price::PriceCommands, quote::QuoteCommands,
};

#[derive(Parser)]
#[command(name = "cutstock")]
#[command(version, about = "Cutstock costing toolkit")]
#[command(
    long_about = "Cost cut-stock parts from shorthand measurements, parametric volume formulas, and date-effective material prices."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Catalog directory (default: ./catalog, or config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Part type catalog
    #[command(subcommand)]
    Part(PartCommands),

    /// Material catalog
    #[command(subcommand)]
    Mat(MatCommands),

    /// Price history
    #[command(subcommand)]
    Price(PriceCommands),

    /// Shorthand measurement conversion
    #[command(subcommand)]
    Measure(MeasureCommands),

    /// Cost quoting
    #[command(subcommand)]
    Quote(QuoteCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Auto,
    /// Aligned table
    Table,
    /// JSON (for programming)
    Json,
    /// CSV (for spreadsheets)
    Csv,
}

impl OutputFormat {
    /// Resolve Auto against the configured default
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        match configured {
            Some("json") => OutputFormat::Json,
            Some("csv") => OutputFormat::Csv,
            _ => OutputFormat::Table,
        }
    }
}
