//! Value types produced by analysis.

mod correlation;
mod pattern;
mod statistics;
mod types;

pub use correlation::{CorrelationMatrix, CorrelationResult};
pub use pattern::{FlaggedValues, Pattern, PatternDetails, PatternKind};
pub use statistics::{FieldStatistics, Quartiles};
pub use types::{Direction, FieldKind, Strength};
