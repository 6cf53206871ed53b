//! Prompt command - build the request for a narrative report.

use lumen::{ReportContext, ReportKind, ReportRequest};
use serde_json::json;

use super::{emit, open};
use crate::cli::CommonArgs;

pub fn run(
    args: CommonArgs,
    report: String,
    domain: Option<String>,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind: ReportKind = report.parse()?;
    let session = open(&args)?;

    let mut analysis = session.lumen.analyze(&session.dataset);
    let mut context = ReportContext::new();
    if let Some(d) = domain {
        context = context.with_domain(d);
    }
    context = context.with_title(title.unwrap_or_else(|| session.source.file.clone()));
    analysis.source = Some(session.source);

    let request = ReportRequest::new(kind, &analysis, context);

    if args.json {
        let body = json!({
            "kind": request.kind(),
            "system": request.system_prompt(),
            "prompt": request.render(),
            "generatedAt": chrono::Utc::now(),
        });
        return emit(&args, &serde_json::to_string_pretty(&body)?);
    }

    emit(&args, &request.render())
}
