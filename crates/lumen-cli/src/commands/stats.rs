//! Stats command - descriptive statistics per numeric field.

use std::fmt::Write;

use colored::Colorize;
use indexmap::IndexMap;
use lumen::FieldStatistics;

use super::{emit, fmt_num, open, to_json};
use crate::cli::CommonArgs;

pub fn run(args: CommonArgs, fields: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let session = open(&args)?;

    let mut statistics = session.lumen.statistics(&session.dataset);
    if !fields.is_empty() {
        for field in &fields {
            if !statistics.contains_key(field) {
                return Err(format!("No numeric field named '{}'", field).into());
            }
        }
        statistics.retain(|name, _| fields.contains(name));
    }

    if args.json {
        return emit(&args, &to_json(&statistics)?);
    }

    emit(&args, &render(&statistics)?)
}

fn render(
    statistics: &IndexMap<String, FieldStatistics>,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    if statistics.is_empty() {
        writeln!(out, "{}", "No numeric fields found.".yellow())?;
        return Ok(out);
    }

    for (field, s) in statistics {
        writeln!(out, "{}", field.cyan().bold())?;
        writeln!(
            out,
            "  count {}  missing {}  unique {}",
            s.count, s.null_count, s.unique_count
        )?;
        writeln!(
            out,
            "  mean {}  median {}  sd {}",
            fmt_num(s.mean),
            fmt_num(s.median),
            fmt_num(s.standard_deviation)
        )?;
        writeln!(
            out,
            "  min {}  q1 {}  q3 {}  max {}",
            fmt_num(s.min),
            fmt_num(s.quartiles.q1),
            fmt_num(s.quartiles.q3),
            fmt_num(s.max)
        )?;
        writeln!(
            out,
            "  skewness {}  kurtosis {}",
            fmt_num(s.skewness),
            fmt_num(s.kurtosis)
        )?;
        if !s.outliers.is_empty() {
            let listed = s
                .outliers
                .iter()
                .take(10)
                .map(|v| fmt_num(*v))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "  {} {}", "outliers".red(), listed)?;
        }
        writeln!(out)?;
    }

    Ok(out.trim_end().to_string())
}
