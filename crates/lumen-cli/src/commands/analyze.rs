//! Analyze command - run every analysis and summarize the findings.

use std::fmt::Write;

use colored::Colorize;

use super::{emit, open, to_json};
use crate::cli::CommonArgs;

pub fn run(args: CommonArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;

    let mut report = session.lumen.analyze(&session.dataset);
    report.source = Some(session.source);

    if args.json {
        return emit(&args, &to_json(&report)?);
    }

    let summary = &report.summary;
    let mut out = String::new();

    let file = report.source.as_ref().map(|s| s.file.as_str()).unwrap_or("dataset");
    writeln!(out, "{} {}", "Analyzed".cyan().bold(), file.white())?;
    writeln!(
        out,
        "{} rows, {} fields ({} numeric)",
        summary.row_count.to_string().white().bold(),
        summary.field_count,
        summary.numeric_field_count
    )?;

    if verbose {
        writeln!(out)?;
        writeln!(out, "{}", "Fields:".yellow().bold())?;
        for (field, kind) in &report.field_kinds {
            writeln!(out, "  {:24} {}", field, kind)?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Found {} correlations and {} patterns",
        summary.correlation_count.to_string().white().bold(),
        summary.pattern_count.to_string().white().bold()
    )?;
    if !summary.patterns_by_kind.is_empty() {
        let kinds = summary
            .patterns_by_kind
            .iter()
            .map(|(kind, count)| format!("{} {}", count, kind))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "  ({})", kinds)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Key insights:".yellow().bold())?;
    for insight in &summary.insights {
        writeln!(out, "  • {}", insight)?;
    }

    emit(&args, out.trim_end())
}
