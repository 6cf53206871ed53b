//! Turning analysis results into readable output.
//!
//! Insight lines are generated locally by fixed rules. Narrative reports are
//! left to a language model; this module only builds the request.

mod context;
mod insights;
mod prompts;

pub use context::ReportContext;
pub use insights::{InsightEngine, MAX_INSIGHTS};
pub use prompts::{ReportKind, ReportRequest, system_prompt};
