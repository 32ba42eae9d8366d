use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use weather_market_core::{StockObservation, WeatherObservation};

/// Reads observation series stored as JSON arrays.
pub struct JsonStorage;

impl JsonStorage {
    /// Reads a JSON array of weather observations.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or is not a valid array
    pub fn read_weather(path: impl AsRef<Path>) -> Result<Vec<WeatherObservation>> {
        read_array(path.as_ref())
    }

    /// Reads a JSON array of stock observations.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or is not a valid array
    pub fn read_stock(path: impl AsRef<Path>) -> Result<Vec<StockObservation>> {
        read_array(path.as_ref())
    }
}

fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    tracing::debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}
