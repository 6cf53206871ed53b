//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lumen: statistics, correlations and patterns for tabular JSON data
#[derive(Parser)]
#[command(name = "lumen")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the data file (JSON array of records)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Analysis configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for k-means initialization
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every analysis and print a summary
    Analyze {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Descriptive statistics for numeric fields
    Stats {
        #[command(flatten)]
        common: CommonArgs,

        /// Only show these fields (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },

    /// Pairwise correlations between numeric fields
    Correlate {
        #[command(flatten)]
        common: CommonArgs,

        /// Print the full correlation matrix
        #[arg(long)]
        matrix: bool,
    },

    /// Trends, seasonality, anomalies and clusters
    Patterns {
        #[command(flatten)]
        common: CommonArgs,

        /// Only show patterns of this kind
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Build the prompt for a narrative report
    Prompt {
        #[command(flatten)]
        common: CommonArgs,

        /// Report kind (executive, technical, recommendations)
        #[arg(short, long, default_value = "executive")]
        report: String,

        /// Domain context (e.g., "marketing", "operations")
        #[arg(short, long)]
        domain: Option<String>,

        /// Dataset title
        #[arg(short, long)]
        title: Option<String>,
    },
}
