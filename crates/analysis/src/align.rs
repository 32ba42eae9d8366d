//! Date alignment of weather and stock series.
//!
//! Both series are keyed by calendar day and inner-joined. Days present in
//! only one series are dropped rather than interpolated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use weather_market_core::{StockObservation, WeatherObservation};

/// A numeric column of the aligned dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    TemperatureAvg,
    Precipitation,
    Humidity,
    WindSpeed,
    Pressure,
    ClosePrice,
    PercentageChange,
    Volume,
}

impl Variable {
    /// The five weather variables, in reporting order.
    pub const WEATHER: [Variable; 5] = [
        Variable::TemperatureAvg,
        Variable::Precipitation,
        Variable::Humidity,
        Variable::WindSpeed,
        Variable::Pressure,
    ];

    /// Every numeric column, weather first, in matrix order.
    pub const ALL: [Variable; 8] = [
        Variable::TemperatureAvg,
        Variable::Precipitation,
        Variable::Humidity,
        Variable::WindSpeed,
        Variable::Pressure,
        Variable::ClosePrice,
        Variable::PercentageChange,
        Variable::Volume,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TemperatureAvg => "temperature_avg",
            Self::Precipitation => "precipitation",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind_speed",
            Self::Pressure => "pressure",
            Self::ClosePrice => "close_price",
            Self::PercentageChange => "percentage_change",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day present in both series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub temperature_avg: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub close_price: f64,
    pub percentage_change: f64,
    pub volume: f64,
}

impl AlignedRow {
    fn combine(date: NaiveDate, weather: &WeatherObservation, stock: &StockObservation) -> Self {
        Self {
            date,
            temperature_avg: weather.temperature_avg,
            precipitation: weather.precipitation,
            humidity: weather.humidity,
            wind_speed: weather.wind_speed,
            pressure: weather.pressure,
            close_price: stock.close_f64(),
            percentage_change: stock.percentage_change,
            volume: stock.volume as f64,
        }
    }

    /// Value of a single column for this row.
    #[must_use]
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::TemperatureAvg => self.temperature_avg,
            Variable::Precipitation => self.precipitation,
            Variable::Humidity => self.humidity,
            Variable::WindSpeed => self.wind_speed,
            Variable::Pressure => self.pressure,
            Variable::ClosePrice => self.close_price,
            Variable::PercentageChange => self.percentage_change,
            Variable::Volume => self.volume,
        }
    }
}

/// Inner join of a weather and a stock series, ascending by date.
///
/// Rows are unique by date and never outnumber the shorter input series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedSample {
    rows: Vec<AlignedRow>,
}

impl AlignedSample {
    #[must_use]
    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Shared calendar days, ascending.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Extracts one column as a vector parallel to [`Self::dates`].
    #[must_use]
    pub fn column(&self, variable: Variable) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(variable)).collect()
    }
}

/// Inner-joins the two series on calendar day.
///
/// Time-of-day is discarded before keying. When a series holds more than one
/// observation for the same day, the last one wins.
#[must_use]
pub fn align(weather: &[WeatherObservation], stock: &[StockObservation]) -> AlignedSample {
    let weather_by_day: BTreeMap<NaiveDate, &WeatherObservation> =
        weather.iter().map(|w| (w.calendar_date(), w)).collect();
    let stock_by_day: BTreeMap<NaiveDate, &StockObservation> =
        stock.iter().map(|s| (s.calendar_date(), s)).collect();

    let rows: Vec<AlignedRow> = weather_by_day
        .iter()
        .filter_map(|(day, w)| {
            stock_by_day
                .get(day)
                .map(|s| AlignedRow::combine(*day, w, s))
        })
        .collect();

    tracing::debug!(
        weather = weather.len(),
        stock = stock.len(),
        aligned = rows.len(),
        "Aligned weather and stock series"
    );

    AlignedSample { rows }
}
