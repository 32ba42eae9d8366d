//! Daily weather observation model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative weather condition reported alongside a daily observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
}

impl WeatherCondition {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
            Self::Snowy => "snowy",
            Self::Foggy => "foggy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single day of weather for one city.
///
/// Units: temperature in Celsius, precipitation in mm, humidity in percent,
/// wind speed in m/s, pressure in hPa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Observation timestamp; only the calendar day is used for alignment
    pub date: DateTime<Utc>,
    /// City the observation was taken in
    pub city: String,
    /// Average temperature for the day
    pub temperature_avg: f64,
    /// Total precipitation
    pub precipitation: f64,
    /// Relative humidity
    pub humidity: f64,
    /// Average wind speed
    pub wind_speed: f64,
    /// Atmospheric pressure
    pub pressure: f64,
    /// Dominant condition, when the source reports one
    #[serde(default)]
    pub condition: Option<WeatherCondition>,
}

impl WeatherObservation {
    /// Creates an observation without a reported condition.
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        city: impl Into<String>,
        temperature_avg: f64,
        precipitation: f64,
        humidity: f64,
        wind_speed: f64,
        pressure: f64,
    ) -> Self {
        Self {
            date,
            city: city.into(),
            temperature_avg,
            precipitation,
            humidity,
            wind_speed,
            pressure,
            condition: None,
        }
    }

    /// Attaches a weather condition.
    #[must_use]
    pub fn with_condition(mut self, condition: WeatherCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Calendar day of the observation with the time-of-day dropped.
    #[must_use]
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}
