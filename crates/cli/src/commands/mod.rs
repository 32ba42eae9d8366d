//! CLI commands for the weather/market correlation engine.

pub mod analyze;
pub mod events;
pub mod input;
pub mod matrix;
pub mod summary;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use events::{run_events, EventsArgs};
pub use matrix::{run_matrix, MatrixArgs};
pub use summary::{run_summary, SummaryArgs};
