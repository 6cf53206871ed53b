//! Prompt construction for narrative reports.
//!
//! A [`ReportRequest`] captures everything a language model needs to write a
//! report about one analysis. It is built once from an [`AnalysisReport`] and
//! never mutated; [`ReportRequest::render`] produces the prompt text. Sending
//! the prompt is the caller's concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::context::ReportContext;
use crate::error::LumenError;
use crate::lumen::AnalysisReport;

/// Fields listed in the statistics section of a prompt.
const MAX_PROMPT_FIELDS: usize = 20;
/// Correlations listed in a prompt.
const MAX_PROMPT_CORRELATIONS: usize = 10;
/// Patterns listed in a prompt.
const MAX_PROMPT_PATTERNS: usize = 15;

/// Kind of narrative report to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Short summary for a non-technical reader.
    Executive,
    /// Full walk-through of statistics, correlations and patterns.
    Technical,
    /// Concrete next steps.
    Recommendations,
}

impl ReportKind {
    fn task(&self) -> &'static str {
        match self {
            ReportKind::Executive => {
                "Write an executive summary (3-5 short paragraphs) for a non-technical \
reader. Lead with the most important finding, explain what it means for the \
business, and avoid statistical jargon."
            }
            ReportKind::Technical => {
                "Write a technical report for a data analyst. Cover data quality, \
distributions, relationships between fields, and detected patterns. Quote the \
numbers you rely on and note where sample sizes limit the conclusions."
            }
            ReportKind::Recommendations => {
                "List 3-7 concrete, prioritised recommendations grounded in the \
findings below. For each one, state the supporting evidence and the expected \
impact."
            }
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Executive => write!(f, "executive"),
            ReportKind::Technical => write!(f, "technical"),
            ReportKind::Recommendations => write!(f, "recommendations"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = LumenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "executive" | "summary" => Ok(ReportKind::Executive),
            "technical" | "detailed" => Ok(ReportKind::Technical),
            "recommendations" | "actions" => Ok(ReportKind::Recommendations),
            other => Err(LumenError::InvalidInput(format!(
                "unknown report kind '{}', expected executive, technical or recommendations",
                other
            ))),
        }
    }
}

/// An immutable request for a narrative report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    kind: ReportKind,
    context: ReportContext,
    overview: String,
    statistics: String,
    correlations: String,
    patterns: String,
    insights: Vec<String>,
}

impl ReportRequest {
    /// Capture the parts of `report` the prompt needs.
    pub fn new(kind: ReportKind, report: &AnalysisReport, context: ReportContext) -> Self {
        Self {
            kind,
            context,
            overview: overview_section(report),
            statistics: statistics_section(report),
            correlations: correlations_section(report),
            patterns: patterns_section(report),
            insights: report.summary.insights.clone(),
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn context(&self) -> &ReportContext {
        &self.context
    }

    /// Instructions that frame every report request.
    pub fn system_prompt(&self) -> &'static str {
        system_prompt()
    }

    /// Render the user prompt.
    pub fn render(&self) -> String {
        let insights = if self.insights.is_empty() {
            "None".to_string()
        } else {
            self.insights
                .iter()
                .map(|line| format!("- {}", line))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            r#"Prepare a {} report from the analysis of a tabular dataset.

## Context
{}

## Dataset
{}

## Field Statistics
{}

## Correlations
{}

## Patterns
{}

## Key Insights
{}

## Task
{}
Only state facts supported by the numbers above."#,
            self.kind,
            self.context.to_prompt_string(),
            self.overview,
            self.statistics,
            self.correlations,
            self.patterns,
            insights,
            self.kind.task()
        )
    }
}

/// System prompt for report requests.
pub fn system_prompt() -> &'static str {
    r#"You are a data analyst writing reports from automated analysis results.

Guidelines:
- Be concise and specific
- Reference actual field names and values
- Distinguish correlation from causation
- Say when a sample is too small to support a conclusion
- Do not invent figures that are not in the provided results"#
}

fn overview_section(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let mut lines = vec![
        format!("- Rows: {}", summary.row_count),
        format!(
            "- Fields: {} ({} numeric)",
            summary.field_count, summary.numeric_field_count
        ),
    ];
    if let Some(ref source) = report.source {
        lines.push(format!("- Source: {}", source.file));
    }
    let kinds = report
        .field_kinds
        .iter()
        .map(|(field, kind)| format!("{} ({})", field, kind))
        .collect::<Vec<_>>()
        .join(", ");
    if !kinds.is_empty() {
        lines.push(format!("- Field types: {}", kinds));
    }
    lines.join("\n")
}

fn statistics_section(report: &AnalysisReport) -> String {
    if report.statistics.is_empty() {
        return "No numeric fields.".to_string();
    }

    let mut lines: Vec<String> = report
        .statistics
        .iter()
        .take(MAX_PROMPT_FIELDS)
        .map(|(field, s)| {
            format!(
                "- {}: n={}, mean={:.2}, median={:.2}, sd={:.2}, min={:.2}, max={:.2}, missing={}, outliers={}",
                field,
                s.count,
                s.mean,
                s.median,
                s.standard_deviation,
                s.min,
                s.max,
                s.null_count,
                s.outliers.len()
            )
        })
        .collect();
    if report.statistics.len() > MAX_PROMPT_FIELDS {
        lines.push(format!(
            "- ... and {} more fields",
            report.statistics.len() - MAX_PROMPT_FIELDS
        ));
    }
    lines.join("\n")
}

fn correlations_section(report: &AnalysisReport) -> String {
    if report.correlations.is_empty() {
        return "No notable correlations.".to_string();
    }

    report
        .correlations
        .iter()
        .take(MAX_PROMPT_CORRELATIONS)
        .map(|c| {
            let p = c
                .p_value
                .map(|p| format!(", p≈{:.3}", p))
                .unwrap_or_default();
            format!(
                "- {} vs {}: r={:.3} ({} {}, n={}{})",
                c.field1, c.field2, c.coefficient, c.strength, c.direction, c.sample_size, p
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn patterns_section(report: &AnalysisReport) -> String {
    if report.patterns.is_empty() {
        return "No patterns detected.".to_string();
    }

    report
        .patterns
        .iter()
        .take(MAX_PROMPT_PATTERNS)
        .map(|p| {
            format!(
                "- [{}] {} (confidence {:.2}, {})",
                p.kind(),
                p.description,
                p.confidence,
                p.strength
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
