//! Correlate command - pairwise Pearson correlations.

use std::fmt::Write;

use colored::Colorize;
use lumen::{CorrelationMatrix, CorrelationResult, Strength};

use super::{emit, open, to_json};
use crate::cli::CommonArgs;

pub fn run(args: CommonArgs, matrix: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;
    let engine = lumen::CorrelationEngine::with_config(session.lumen.config().correlation.clone());

    if matrix {
        let matrix = engine.correlation_matrix(&session.dataset);
        if args.json {
            return emit(&args, &to_json(&matrix)?);
        }
        return emit(&args, &render_matrix(&matrix)?);
    }

    let correlations = engine.find_correlations(&session.dataset);
    if args.json {
        return emit(&args, &to_json(&correlations)?);
    }
    emit(&args, &render(&correlations)?)
}

fn render(correlations: &[CorrelationResult]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    if correlations.is_empty() {
        writeln!(out, "{}", "No notable correlations found.".yellow())?;
        return Ok(out);
    }

    writeln!(
        out,
        "{} correlations (|r| > threshold)",
        correlations.len().to_string().white().bold()
    )?;
    for c in correlations {
        let strength = match c.strength {
            Strength::Strong => c.strength.to_string().green(),
            Strength::Moderate => c.strength.to_string().yellow(),
            Strength::Weak => c.strength.to_string().normal(),
        };
        let p = c
            .p_value
            .map(|p| format!("  p≈{:.4}", p))
            .unwrap_or_default();
        writeln!(
            out,
            "  {:>7.3}  {} ~ {}  {} {}  n={}{}",
            c.coefficient, c.field1, c.field2, strength, c.direction, c.sample_size, p
        )?;
    }

    Ok(out.trim_end().to_string())
}

fn render_matrix(matrix: &CorrelationMatrix) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    if matrix.is_empty() {
        writeln!(out, "{}", "No numeric fields found.".yellow())?;
        return Ok(out);
    }

    let width = matrix.fields.iter().map(|f| f.len()).max().unwrap_or(0).max(7);
    write!(out, "{:width$}", "", width = width)?;
    for field in &matrix.fields {
        write!(out, " {:>width$}", field, width = width)?;
    }
    writeln!(out)?;

    for (field, row) in matrix.fields.iter().zip(&matrix.values) {
        write!(out, "{:width$}", field, width = width)?;
        for value in row {
            write!(out, " {:>width$.3}", value, width = width)?;
        }
        writeln!(out)?;
    }

    Ok(out.trim_end().to_string())
}
