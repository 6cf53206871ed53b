//! Lumen CLI - tabular analysis from the command line.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Analyze { common } => commands::analyze::run(common, cli.verbose),
        Commands::Stats { common, fields } => commands::stats::run(common, fields),
        Commands::Correlate { common, matrix } => commands::correlate::run(common, matrix),
        Commands::Patterns { common, kind } => commands::patterns::run(common, kind),
        Commands::Prompt {
            common,
            report,
            domain,
            title,
        } => commands::prompt::run(common, report, domain, title),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
