use thiserror::Error;

/// Errors surfaced by correlation analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The two series share no calendar day.
    #[error(
        "No overlapping data found for correlation analysis \
         ({weather_records} weather records, {stock_records} stock records)"
    )]
    NoOverlappingData {
        weather_records: usize,
        stock_records: usize,
    },
}
