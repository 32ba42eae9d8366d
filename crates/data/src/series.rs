//! Format-agnostic loading of observation series.
//!
//! Files ending in `.json` are read as JSON arrays; anything else is read
//! as CSV. Loaded series are de-duplicated by calendar day.

use crate::{CsvStorage, JsonStorage};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use weather_market_core::{StockObservation, WeatherObservation};

/// Loads a weather series from a CSV or JSON file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_weather_series(path: impl AsRef<Path>) -> Result<Vec<WeatherObservation>> {
    let path = path.as_ref();
    let raw = if is_json(path) {
        JsonStorage::read_weather(path)?
    } else {
        CsvStorage::read_weather(path)?
    };

    Ok(dedup_by_date(raw, WeatherObservation::calendar_date))
}

/// Loads a stock series from a CSV or JSON file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_stock_series(path: impl AsRef<Path>) -> Result<Vec<StockObservation>> {
    let path = path.as_ref();
    let raw = if is_json(path) {
        JsonStorage::read_stock(path)?
    } else {
        CsvStorage::read_stock(path)?
    };

    Ok(dedup_by_date(raw, StockObservation::calendar_date))
}

/// Keeps the last observation seen for each calendar day, ascending by day.
pub fn dedup_by_date<T>(records: Vec<T>, day: impl Fn(&T) -> NaiveDate) -> Vec<T> {
    let before = records.len();
    let mut by_day = BTreeMap::new();
    for record in records {
        by_day.insert(day(&record), record);
    }

    if by_day.len() < before {
        tracing::warn!(
            "Dropped {} duplicate observation(s) sharing a calendar day",
            before - by_day.len()
        );
    }

    by_day.into_values().collect()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
