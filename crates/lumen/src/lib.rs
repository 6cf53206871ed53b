//! Lumen: numeric analysis for tabular datasets.
//!
//! Lumen takes an array of row records, works out which fields are numeric,
//! and derives descriptive statistics, pairwise correlations, and patterns
//! (trends, seasonality, anomalies and clusters) from them.
//!
//! # Core Principles
//!
//! - **Pure**: analysis never mutates the dataset and never fails; sparse or
//!   degenerate data is skipped rather than reported as an error
//! - **Ordered**: field order from the first record is kept in every output
//! - **Reproducible**: clustering draws from an injectable random source, so
//!   a fixed seed gives identical results
//!
//! # Example
//!
//! ```no_run
//! use lumen::Lumen;
//!
//! let lumen = Lumen::new().with_seed(42);
//! let report = lumen.analyze_file("sales.json").unwrap();
//!
//! println!("Numeric fields: {}", report.statistics.len());
//! for insight in &report.summary.insights {
//!     println!("- {insight}");
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod report;

mod lumen;

pub use crate::lumen::{AnalysisReport, AnalysisSummary, Lumen};
pub use analysis::{CorrelationEngine, FieldTyper, PatternDetector, RandomSource, SequenceSource};
pub use config::{AnalysisConfig, ClusterConfig, CorrelationConfig, PatternConfig};
pub use error::{LumenError, Result};
pub use input::{Dataset, Loader, LoaderConfig, Row, SourceMetadata, Value};
pub use model::{
    CorrelationMatrix, CorrelationResult, Direction, FieldKind, FieldStatistics, FlaggedValues,
    Pattern, PatternDetails, PatternKind, Quartiles, Strength,
};
pub use report::{InsightEngine, ReportContext, ReportKind, ReportRequest};
