//! Statistical association between weather and market price series.
//!
//! The engine consumes two already-fetched observation series and produces:
//! - per-variable Pearson correlations with p-values and strength buckets
//! - an overall correlation with a Fisher-z confidence interval
//! - an all-pairs correlation matrix over the aligned columns
//! - extreme-weather days ranked by same-day market impact
//!
//! Every operation is a pure function of its inputs.

pub mod align;
pub mod analyzer;
pub mod confidence;
pub mod correlation;
pub mod error;
pub mod events;
pub mod matrix;
pub mod report;
pub mod series_summary;
pub mod summary;

pub use align::{align, AlignedRow, AlignedSample, Variable};
pub use analyzer::{analyze, analyze_with_confidence, AnalysisRequest, CorrelationAnalysis};
pub use confidence::{confidence_interval, DEFAULT_CONFIDENCE};
pub use correlation::{classify_strength, correlate, CorrelationResult, PairCorrelation};
pub use error::AnalysisError;
pub use events::{classify_extreme, detect_events, detect_events_with, SignificantEvent};
pub use matrix::{build_matrix, matrix_for_sample, CorrelationMatrix};
pub use report::{matrix_to_text, CorrelationReport};
pub use series_summary::{StockSummary, WeatherSummary};
pub use summary::{CorrelationSummary, VariableCorrelation};
