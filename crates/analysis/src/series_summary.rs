//! Descriptive summaries of a single observation series.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use weather_market_core::{
    percentage_change, StockObservation, WeatherCondition, WeatherObservation,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub avg_temperature: f64,
    pub total_precipitation: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    /// Most frequent reported condition; `None` if no day reports one
    pub most_common_condition: Option<WeatherCondition>,
    pub data_points: usize,
}

impl WeatherSummary {
    /// Summarises a weather series. Returns `None` for an empty series.
    #[must_use]
    pub fn from_observations(observations: &[WeatherObservation]) -> Option<Self> {
        let first = observations.first()?;
        let n = observations.len() as f64;

        let start_date = observations.iter().map(|o| o.date).min()?;
        let end_date = observations.iter().map(|o| o.date).max()?;

        Some(Self {
            city: first.city.clone(),
            start_date,
            end_date,
            avg_temperature: observations.iter().map(|o| o.temperature_avg).sum::<f64>() / n,
            total_precipitation: observations.iter().map(|o| o.precipitation).sum(),
            avg_humidity: observations.iter().map(|o| o.humidity).sum::<f64>() / n,
            avg_wind_speed: observations.iter().map(|o| o.wind_speed).sum::<f64>() / n,
            most_common_condition: most_common(observations.iter().filter_map(|o| o.condition)),
            data_points: observations.len(),
        })
    }
}

/// Most frequent item; the first one seen wins ties.
fn most_common(items: impl Iterator<Item = WeatherCondition>) -> Option<WeatherCondition> {
    let mut counts: Vec<(WeatherCondition, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(c, _)| *c == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(WeatherCondition, usize)> = None;
    for (condition, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((condition, count));
        }
    }
    best.map(|(condition, _)| condition)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub symbol: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Close on the earliest day
    pub start_price: Decimal,
    /// Close on the latest day
    pub end_price: Decimal,
    /// (end - start) / start * 100
    pub total_return: f64,
    pub avg_volume: f64,
    /// Highest close
    pub max_price: Decimal,
    /// Lowest close
    pub min_price: Decimal,
    /// Sample standard deviation of daily percentage changes
    pub volatility: f64,
    pub data_points: usize,
}

impl StockSummary {
    /// Summarises a stock series. Returns `None` for an empty series.
    #[must_use]
    pub fn from_observations(observations: &[StockObservation]) -> Option<Self> {
        let earliest = observations.iter().min_by_key(|o| o.date)?;
        let latest = observations.iter().max_by_key(|o| o.date)?;
        let n = observations.len();

        let total_return = percentage_change(earliest.close_price, latest.close_price);

        let changes: Vec<f64> = observations.iter().map(|o| o.percentage_change).collect();

        Some(Self {
            symbol: earliest.symbol.clone(),
            start_date: earliest.date,
            end_date: latest.date,
            start_price: earliest.close_price,
            end_price: latest.close_price,
            total_return,
            avg_volume: observations.iter().map(|o| o.volume as f64).sum::<f64>() / n as f64,
            max_price: observations.iter().map(|o| o.close_price).max()?,
            min_price: observations.iter().map(|o| o.close_price).min()?,
            volatility: sample_std_dev(&changes),
            data_points: n,
        })
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let std_dev = values.std_dev();
    if std_dev.is_finite() {
        std_dev
    } else {
        0.0
    }
}
