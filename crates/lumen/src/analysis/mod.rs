//! Numeric analysis over a [`Dataset`](crate::input::Dataset).
//!
//! - [`typing`]: decides which fields are numeric and extracts their values
//! - [`descriptive`]: per-field summary statistics
//! - [`correlation`]: pairwise Pearson correlation
//! - [`patterns`]: trend, seasonality, anomaly, outlier and cluster detection
//! - [`clustering`]: k-means and silhouette scoring used by pattern detection

pub mod clustering;
pub mod correlation;
pub mod descriptive;
pub mod math;
pub mod patterns;
pub mod random;
pub mod typing;

pub use clustering::{KMeansResult, Point, kmeans, silhouette_score};
pub use correlation::CorrelationEngine;
pub use descriptive::{describe, describe_dataset};
pub use patterns::{LinearFit, PatternDetector, SeasonalFit, autocorrelation, linear_fit, seasonal_fit};
pub use random::{RandomSource, SequenceSource, rng_from_seed};
pub use typing::FieldTyper;
