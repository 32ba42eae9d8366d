//! Headline weather-versus-price correlation analysis.
//!
//! Each of the five weather variables is correlated against the closing
//! price over the days both series share. The overall correlation is the
//! mean of the absolute coefficients, so it ranges over [0, 1] and does not
//! distinguish positive from negative relationships.

use crate::align::{align, AlignedSample, Variable};
use crate::confidence::{confidence_interval, DEFAULT_CONFIDENCE};
use crate::correlation::{correlate, CorrelationResult};
use crate::error::AnalysisError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use weather_market_core::{StockObservation, Timeframe, WeatherObservation};

/// Identifying metadata carried through to the analysis unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub city: String,
    pub timeframe: Timeframe,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        city: impl Into<String>,
        timeframe: Timeframe,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            city: city.into(),
            timeframe,
            start_date,
            end_date,
        }
    }

    /// Request covering the timeframe's window ending at `now`.
    #[must_use]
    pub fn for_timeframe(
        symbol: impl Into<String>,
        city: impl Into<String>,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Self {
        let (start_date, end_date) = timeframe.date_range(now);
        Self::new(symbol, city, timeframe, start_date, end_date)
    }
}

/// Correlation of each weather variable with the closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
    pub symbol: String,
    pub city: String,
    pub timeframe: Timeframe,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    pub temperature: CorrelationResult,
    pub precipitation: CorrelationResult,
    pub humidity: CorrelationResult,
    pub wind_speed: CorrelationResult,
    pub pressure: CorrelationResult,

    /// Mean of the five absolute coefficients [0, 1]
    pub overall_correlation: f64,
    /// Square of the overall correlation
    pub r_squared: f64,
    /// Confidence interval around the overall correlation, [lower, upper]
    pub confidence_interval: [f64; 2],
    /// Number of aligned days
    pub sample_size: usize,
}

impl CorrelationAnalysis {
    /// Per-variable results paired with their variable, in reporting order.
    #[must_use]
    pub fn results(&self) -> [(Variable, &CorrelationResult); 5] {
        [
            (Variable::TemperatureAvg, &self.temperature),
            (Variable::Precipitation, &self.precipitation),
            (Variable::Humidity, &self.humidity),
            (Variable::WindSpeed, &self.wind_speed),
            (Variable::Pressure, &self.pressure),
        ]
    }

    /// Result for one weather variable, `None` for market variables.
    #[must_use]
    pub fn result_for(&self, variable: Variable) -> Option<&CorrelationResult> {
        self.results()
            .into_iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, r)| r)
    }
}

/// Runs the analysis at the default 95% confidence level.
///
/// # Errors
/// Returns [`AnalysisError::NoOverlappingData`] if the series share no day.
pub fn analyze(
    weather: &[WeatherObservation],
    stock: &[StockObservation],
    request: &AnalysisRequest,
) -> Result<CorrelationAnalysis, AnalysisError> {
    analyze_with_confidence(weather, stock, request, DEFAULT_CONFIDENCE)
}

/// Runs the analysis with an explicit confidence level for the interval.
///
/// # Errors
/// Returns [`AnalysisError::NoOverlappingData`] if the series share no day.
pub fn analyze_with_confidence(
    weather: &[WeatherObservation],
    stock: &[StockObservation],
    request: &AnalysisRequest,
    confidence: f64,
) -> Result<CorrelationAnalysis, AnalysisError> {
    let sample = align(weather, stock);

    if sample.is_empty() {
        tracing::warn!(
            symbol = %request.symbol,
            city = %request.city,
            "No overlapping dates between weather and stock series"
        );
        return Err(AnalysisError::NoOverlappingData {
            weather_records: weather.len(),
            stock_records: stock.len(),
        });
    }

    let analysis = analyze_sample(&sample, request, confidence);

    tracing::info!(
        symbol = %analysis.symbol,
        city = %analysis.city,
        overall_correlation = analysis.overall_correlation,
        sample_size = analysis.sample_size,
        "Correlation analysis completed"
    );

    Ok(analysis)
}

fn analyze_sample(
    sample: &AlignedSample,
    request: &AnalysisRequest,
    confidence: f64,
) -> CorrelationAnalysis {
    let close = sample.column(Variable::ClosePrice);
    let against_close =
        |variable: Variable| CorrelationResult::from_pair(correlate(&sample.column(variable), &close));

    let temperature = against_close(Variable::TemperatureAvg);
    let precipitation = against_close(Variable::Precipitation);
    let humidity = against_close(Variable::Humidity);
    let wind_speed = against_close(Variable::WindSpeed);
    let pressure = against_close(Variable::Pressure);

    let coefficients = [
        temperature.coefficient,
        precipitation.coefficient,
        humidity.coefficient,
        wind_speed.coefficient,
        pressure.coefficient,
    ];
    let overall_correlation =
        coefficients.iter().map(|c| c.abs()).sum::<f64>() / coefficients.len() as f64;

    let sample_size = sample.len();

    CorrelationAnalysis {
        symbol: request.symbol.clone(),
        city: request.city.clone(),
        timeframe: request.timeframe,
        start_date: request.start_date,
        end_date: request.end_date,
        temperature,
        precipitation,
        humidity,
        wind_speed,
        pressure,
        overall_correlation,
        r_squared: overall_correlation * overall_correlation,
        confidence_interval: confidence_interval(overall_correlation, sample_size, confidence),
        sample_size,
    }
}
