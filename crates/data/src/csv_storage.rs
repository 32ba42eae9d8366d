use anyhow::{anyhow, Context, Result};
use csv::{Reader, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use weather_market_core::{parse_date, StockObservation, WeatherCondition, WeatherObservation};

pub struct CsvStorage;

/// Weather row as it appears on disk. Dates may be plain days or timestamps.
#[derive(Debug, Deserialize)]
struct WeatherRow {
    date: String,
    city: String,
    temperature_avg: f64,
    precipitation: f64,
    humidity: f64,
    wind_speed: f64,
    pressure: f64,
    #[serde(default)]
    condition: Option<WeatherCondition>,
}

/// Stock row as it appears on disk. `percentage_change` is derived when absent.
#[derive(Debug, Deserialize)]
struct StockRow {
    date: String,
    symbol: String,
    open_price: String,
    close_price: String,
    high_price: String,
    low_price: String,
    volume: u64,
    #[serde(default)]
    percentage_change: Option<f64>,
}

impl CsvStorage {
    /// Reads weather observations from a CSV file.
    ///
    /// Format: date,city,temperature_avg,precipitation,humidity,wind_speed,pressure[,condition]
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or a row fails to parse
    pub fn read_weather(path: impl AsRef<Path>) -> Result<Vec<WeatherObservation>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open weather CSV: {}", path.display()))?;
        let mut reader = Reader::from_reader(file);

        let mut observations = Vec::new();
        for (line, row) in reader.deserialize::<WeatherRow>().enumerate() {
            let row = row.with_context(|| {
                format!("Invalid weather row {} in {}", line + 1, path.display())
            })?;

            observations.push(WeatherObservation {
                date: parse_date(&row.date)?,
                city: row.city,
                temperature_avg: row.temperature_avg,
                precipitation: row.precipitation,
                humidity: row.humidity,
                wind_speed: row.wind_speed,
                pressure: row.pressure,
                condition: row.condition,
            });
        }

        tracing::debug!(
            "Read {} weather observations from {}",
            observations.len(),
            path.display()
        );
        Ok(observations)
    }

    /// Reads stock observations from a CSV file.
    ///
    /// Format: date,symbol,open_price,close_price,high_price,low_price,volume[,percentage_change]
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or a row fails to parse
    pub fn read_stock(path: impl AsRef<Path>) -> Result<Vec<StockObservation>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open stock CSV: {}", path.display()))?;
        let mut reader = Reader::from_reader(file);

        let mut observations = Vec::new();
        for (line, row) in reader.deserialize::<StockRow>().enumerate() {
            let row = row
                .with_context(|| format!("Invalid stock row {} in {}", line + 1, path.display()))?;

            let mut observation = StockObservation::new(
                parse_date(&row.date)?,
                row.symbol,
                parse_price(&row.open_price)?,
                parse_price(&row.close_price)?,
                parse_price(&row.high_price)?,
                parse_price(&row.low_price)?,
                row.volume,
            );
            if let Some(change) = row.percentage_change {
                observation.percentage_change = change;
            }

            observations.push(observation);
        }

        tracing::debug!(
            "Read {} stock observations from {}",
            observations.len(),
            path.display()
        );
        Ok(observations)
    }

    /// Writes weather observations to a CSV file, ascending by date.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_weather(path: impl AsRef<Path>, records: &[WeatherObservation]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let mut writer = Writer::from_writer(file);

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| r.date);

        for record in &sorted {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes stock observations to a CSV file, ascending by date.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_stock(path: impl AsRef<Path>, records: &[StockObservation]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let mut writer = Writer::from_writer(file);

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| r.date);

        for record in &sorted {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn parse_price(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|e| anyhow!("Invalid price '{}': {}", raw, e))
}
