//! Extreme-weather days ranked by same-day market impact.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use weather_market_core::{EventThresholds, EventType, StockObservation, WeatherObservation};

/// An extreme weather day that has a same-day market observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantEvent {
    pub date: DateTime<Utc>,
    pub city: String,
    pub event_type: EventType,
    /// Human-readable reading, e.g. "Extreme heat: 36.0°C"
    pub description: String,
    /// Signed percentage change of the stock that day
    pub market_impact: f64,
    /// Absolute market impact, used for ranking
    pub correlation_impact: f64,
}

/// Classifies a day against the thresholds. First match wins, checked in the
/// order heat, cold, rain, wind.
#[must_use]
pub fn classify_extreme(
    weather: &WeatherObservation,
    thresholds: &EventThresholds,
) -> Option<(EventType, String)> {
    if weather.temperature_avg > thresholds.extreme_heat {
        Some((
            EventType::ExtremeHeat,
            format!("Extreme heat: {:.1}°C", weather.temperature_avg),
        ))
    } else if weather.temperature_avg < thresholds.extreme_cold {
        Some((
            EventType::ExtremeCold,
            format!("Extreme cold: {:.1}°C", weather.temperature_avg),
        ))
    } else if weather.precipitation > thresholds.heavy_rain {
        Some((
            EventType::HeavyRain,
            format!("Heavy rain: {:.1}mm", weather.precipitation),
        ))
    } else if weather.wind_speed > thresholds.high_winds {
        Some((
            EventType::HighWinds,
            format!("High winds: {:.1} m/s", weather.wind_speed),
        ))
    } else {
        None
    }
}

/// Detects extreme-weather events with the default thresholds and limit.
#[must_use]
pub fn detect_events(
    weather: &[WeatherObservation],
    stock: &[StockObservation],
) -> Vec<SignificantEvent> {
    detect_events_with(weather, stock, &EventThresholds::default())
}

/// Detects extreme-weather events, keeping the `max_events` with the largest
/// absolute market move.
///
/// Weather days are visited in input order; ties in impact keep that order.
#[must_use]
pub fn detect_events_with(
    weather: &[WeatherObservation],
    stock: &[StockObservation],
    thresholds: &EventThresholds,
) -> Vec<SignificantEvent> {
    let stock_by_day: HashMap<NaiveDate, &StockObservation> =
        stock.iter().map(|s| (s.calendar_date(), s)).collect();

    let mut events: Vec<SignificantEvent> = weather
        .iter()
        .filter_map(|w| {
            let (event_type, description) = classify_extreme(w, thresholds)?;
            let market = stock_by_day.get(&w.calendar_date())?;

            Some(SignificantEvent {
                date: w.date,
                city: w.city.clone(),
                event_type,
                description,
                market_impact: market.percentage_change,
                correlation_impact: market.percentage_change.abs(),
            })
        })
        .collect();

    events.sort_by(|a, b| rank_by_impact(a.correlation_impact, b.correlation_impact));
    events.truncate(thresholds.max_events);

    tracing::debug!(events = events.len(), "Detected significant weather events");
    events
}

// Total order: finite impacts descending, then non-finite ones.
fn rank_by_impact(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.total_cmp(&a),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
