//! Patterns command - trends, seasonality, anomalies and clusters.

use std::fmt::Write;

use colored::Colorize;
use lumen::{Pattern, PatternKind};

use super::{emit, open, to_json};
use crate::cli::CommonArgs;

pub fn run(args: CommonArgs, kind: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;

    let filter = kind.as_deref().map(parse_kind).transpose()?;
    let mut patterns = session.lumen.patterns(&session.dataset);
    if let Some(kind) = filter {
        patterns.retain(|p| p.kind() == kind);
    }

    if args.json {
        return emit(&args, &to_json(&patterns)?);
    }
    emit(&args, &render(&patterns)?)
}

fn parse_kind(s: &str) -> Result<PatternKind, String> {
    match s.to_lowercase().as_str() {
        "trend" => Ok(PatternKind::Trend),
        "seasonality" | "seasonal" => Ok(PatternKind::Seasonality),
        "anomaly" => Ok(PatternKind::Anomaly),
        "cluster" => Ok(PatternKind::Cluster),
        "outlier" => Ok(PatternKind::Outlier),
        _ => Err(format!(
            "Unknown pattern kind: {}. Use trend, seasonality, anomaly, cluster, or outlier.",
            s
        )),
    }
}

fn render(patterns: &[Pattern]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    if patterns.is_empty() {
        writeln!(out, "{}", "No patterns detected.".yellow())?;
        return Ok(out);
    }

    for pattern in patterns {
        let label = format!("[{}]", pattern.kind());
        let label = match pattern.kind() {
            PatternKind::Anomaly | PatternKind::Outlier => label.red(),
            PatternKind::Trend => label.green(),
            PatternKind::Seasonality => label.blue(),
            PatternKind::Cluster => label.magenta(),
        };
        writeln!(
            out,
            "{:14} {}  ({:.0}% confidence, {})",
            label,
            pattern.description,
            pattern.confidence * 100.0,
            pattern.strength
        )?;
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("Trend").unwrap(), PatternKind::Trend);
        assert_eq!(parse_kind("seasonal").unwrap(), PatternKind::Seasonality);
        assert!(parse_kind("spike").is_err());
    }
}
