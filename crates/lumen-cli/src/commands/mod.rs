//! CLI command implementations.

pub mod analyze;
pub mod correlate;
pub mod patterns;
pub mod prompt;
pub mod stats;

use std::error::Error;
use std::fs;

use lumen::{AnalysisConfig, Dataset, Loader, Lumen, SourceMetadata};
use serde::Serialize;

use crate::cli::CommonArgs;

/// A loaded dataset and the engine configured to analyze it.
pub struct Session {
    pub lumen: Lumen,
    pub dataset: Dataset,
    pub source: SourceMetadata,
}

/// Load configuration and data for a command.
pub fn open(args: &CommonArgs) -> Result<Session, Box<dyn Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    // Plain text when writing to a file.
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let (dataset, source) = Loader::new().load_file(&args.file)?;
    tracing::debug!(file = %source.file, hash = %source.hash, "Opened dataset");

    Ok(Session {
        lumen: Lumen::try_with_config(config)?,
        dataset,
        source,
    })
}

/// Serialize a value as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print `content`, or write it to the requested output file.
pub fn emit(args: &CommonArgs, content: &str) -> Result<(), Box<dyn Error>> {
    match &args.output {
        Some(path) => {
            fs::write(path, content)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            eprintln!("Saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Format a number for tables, trimming noise on large magnitudes.
pub fn fmt_num(value: f64) -> String {
    if value.abs() >= 1e6 || (value != 0.0 && value.abs() < 1e-3) {
        format!("{:.3e}", value)
    } else {
        format!("{:.3}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.5), "1.500");
        assert_eq!(fmt_num(0.0), "0.000");
        assert_eq!(fmt_num(2_500_000.0), "2.500e6");
    }
}
