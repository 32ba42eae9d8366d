//! Combined correlation report.
//!
//! Bundles the headline analysis with the correlation matrix and the ranked
//! extreme-weather events, plus a plain-text rendering for terminals.

#![allow(clippy::format_push_string)]

use crate::analyzer::{analyze_with_confidence, AnalysisRequest, CorrelationAnalysis};
use crate::error::AnalysisError;
use crate::events::{detect_events_with, SignificantEvent};
use crate::matrix::{build_matrix, CorrelationMatrix};
use crate::summary::CorrelationSummary;
use serde::{Deserialize, Serialize};
use weather_market_core::{AppConfig, StockObservation, WeatherObservation};

/// Full output of one weather/market correlation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub analysis: CorrelationAnalysis,
    pub summary: CorrelationSummary,
    pub matrix: CorrelationMatrix,
    pub events: Vec<SignificantEvent>,
}

impl CorrelationReport {
    /// Runs the analysis, matrix build and event detection over the same inputs.
    ///
    /// # Errors
    /// Returns [`AnalysisError::NoOverlappingData`] if the series share no day.
    pub fn generate(
        weather: &[WeatherObservation],
        stock: &[StockObservation],
        request: &AnalysisRequest,
        config: &AppConfig,
    ) -> Result<Self, AnalysisError> {
        let analysis =
            analyze_with_confidence(weather, stock, request, config.analysis.confidence_level)?;
        let summary = CorrelationSummary::from_analysis(&analysis, config.analysis.significance_level);
        let matrix = build_matrix(weather, stock);
        let events = detect_events_with(weather, stock, &config.events);

        Ok(Self {
            analysis,
            summary,
            matrix,
            events,
        })
    }

    /// Converts the report to a human-readable text format.
    #[must_use]
    pub fn to_text(&self) -> String {
        let a = &self.analysis;
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            "  WEATHER / MARKET CORRELATION: {} vs {}\n",
            a.symbol, a.city
        ));
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            "Period:                {} to {} ({})\n",
            a.start_date.format("%Y-%m-%d"),
            a.end_date.format("%Y-%m-%d"),
            a.timeframe
        ));
        output.push_str(&format!("Sample Size:           {} days\n", a.sample_size));
        output.push('\n');

        output.push_str("Correlation with Close Price\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "{:<20} {:>12} {:>12}   {}\n",
            "Variable", "r", "p-value", "Strength"
        ));
        for (variable, result) in a.results() {
            output.push_str(&format!(
                "{:<20} {:>12.4} {:>12.4}   {}\n",
                variable.as_str(),
                result.coefficient,
                result.p_value,
                result.strength
            ));
        }
        output.push('\n');

        output.push_str("Overall\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "Overall Correlation:   {:.4}\n",
            a.overall_correlation
        ));
        output.push_str(&format!("R-squared:             {:.4}\n", a.r_squared));
        output.push_str(&format!(
            "Confidence Interval:   [{:.4}, {:.4}]\n",
            a.confidence_interval[0], a.confidence_interval[1]
        ));
        output.push_str(&format!(
            "Strongest:             {} ({:+.4})\n",
            self.summary.strongest.variable, self.summary.strongest.coefficient
        ));
        output.push_str(&format!(
            "Weakest:               {} ({:+.4})\n",
            self.summary.weakest.variable, self.summary.weakest.coefficient
        ));
        if self.summary.significant.is_empty() {
            output.push_str("Significant:           none\n");
        } else {
            let names: Vec<&str> = self
                .summary
                .significant
                .iter()
                .map(|c| c.variable.as_str())
                .collect();
            output.push_str(&format!("Significant:           {}\n", names.join(", ")));
        }
        output.push('\n');

        output.push_str("Significant Weather Events\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        if self.events.is_empty() {
            output.push_str("No extreme weather days with market data.\n");
        } else {
            for event in &self.events {
                output.push_str(&format!(
                    "{}  {:<28} {:>+8.2}%\n",
                    event.date.format("%Y-%m-%d"),
                    event.description,
                    event.market_impact
                ));
            }
        }

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        if a.sample_size < 30 {
            output.push_str(&format!(
                "\n⚠️  Only {} overlapping days; p-values and intervals are unreliable.\n\n",
                a.sample_size
            ));
        }

        output
    }
}

/// Renders a correlation matrix as an aligned text table.
#[must_use]
pub fn matrix_to_text(matrix: &CorrelationMatrix) -> String {
    if matrix.is_empty() {
        return "No overlapping data; correlation matrix is empty.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<18}", ""));
    for variable in &matrix.variables {
        output.push_str(&format!("{:>10}", abbreviate(variable.as_str())));
    }
    output.push('\n');

    for (variable, row) in matrix.variables.iter().zip(&matrix.matrix) {
        output.push_str(&format!("{:<18}", variable.as_str()));
        for value in row {
            output.push_str(&format!("{value:>10.3}"));
        }
        output.push('\n');
    }

    output
}

fn abbreviate(name: &str) -> &str {
    name.get(..9).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use weather_market_core::Timeframe;

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::days(offset)
    }

    fn inputs() -> (Vec<WeatherObservation>, Vec<StockObservation>) {
        let weather = (0..12)
            .map(|i| {
                let x = i as f64;
                WeatherObservation::new(
                    day(i),
                    "Houston",
                    30.0 + x * 0.8,
                    (x * 1.9).sin().abs() * 60.0,
                    70.0 + (x * 0.5).cos() * 5.0,
                    4.0 + x * 0.3,
                    1005.0 - x,
                )
            })
            .collect();
        let stock = (0..12)
            .map(|i| {
                let open = Decimal::from(80 + i);
                let close = Decimal::from(81 + i);
                StockObservation::new(day(i), "XOM", open, close, close, open, 10_000 + i as u64)
            })
            .collect();
        (weather, stock)
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("XOM", "Houston", Timeframe::OneMonth, day(0), day(30))
    }

    #[test]
    fn generate_bundles_all_parts() {
        let (weather, stock) = inputs();

        let report =
            CorrelationReport::generate(&weather, &stock, &request(), &AppConfig::default())
                .unwrap();

        assert_eq!(report.analysis.sample_size, 12);
        assert_eq!(report.matrix.variables.len(), 8);
        assert!(!report.events.is_empty());
        assert!(report.events.len() <= 10);
        assert_eq!(report.summary.sample_size, 12);
    }

    #[test]
    fn generate_propagates_no_overlap() {
        let (weather, _) = inputs();

        let result = CorrelationReport::generate(&weather, &[], &request(), &AppConfig::default());

        assert!(matches!(
            result,
            Err(AnalysisError::NoOverlappingData { .. })
        ));
    }

    #[test]
    fn generate_respects_configured_event_limit() {
        let (weather, stock) = inputs();
        let mut config = AppConfig::default();
        config.events.max_events = 2;

        let report = CorrelationReport::generate(&weather, &stock, &request(), &config).unwrap();

        assert!(report.events.len() <= 2);
    }

    #[test]
    fn to_text_contains_key_sections() {
        let (weather, stock) = inputs();
        let report =
            CorrelationReport::generate(&weather, &stock, &request(), &AppConfig::default())
                .unwrap();

        let text = report.to_text();

        assert!(text.contains("XOM vs Houston"));
        assert!(text.contains("temperature_avg"));
        assert!(text.contains("Overall Correlation:"));
        assert!(text.contains("Significant Weather Events"));
        assert!(text.contains("Only 12 overlapping days"));
    }

    #[test]
    fn report_serializes_to_json() {
        let (weather, stock) = inputs();
        let report =
            CorrelationReport::generate(&weather, &stock, &request(), &AppConfig::default())
                .unwrap();

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["analysis"]["timeframe"], "1m");
        assert!(json["analysis"]["temperature"]["coefficient"].is_number());
        assert_eq!(json["analysis"]["temperature"]["strength"], "strong");
    }

    #[test]
    fn matrix_text_handles_empty() {
        let text = matrix_to_text(&CorrelationMatrix::default());
        assert!(text.contains("empty"));
    }

    #[test]
    fn matrix_text_lists_every_variable() {
        let (weather, stock) = inputs();
        let text = matrix_to_text(&build_matrix(&weather, &stock));

        assert_eq!(text.lines().count(), 9);
        assert!(text.contains("percentage_change"));
    }
}
