//! File storage for weather and market observation series.
//!
//! This crate provides:
//! - CSV reading and writing of weather and stock series
//! - JSON array reading
//! - Extension-based loading with per-day de-duplication

pub mod csv_storage;
pub mod json_storage;
pub mod series;

pub use csv_storage::CsvStorage;
pub use json_storage::JsonStorage;
pub use series::{dedup_by_date, load_stock_series, load_weather_series};
