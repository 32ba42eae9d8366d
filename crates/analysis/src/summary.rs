//! Condensed view of a correlation analysis.

use crate::align::Variable;
use crate::analyzer::CorrelationAnalysis;
use serde::{Deserialize, Serialize};
use weather_market_core::{CorrelationStrength, Timeframe};

/// One weather variable's correlation with the closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCorrelation {
    pub variable: Variable,
    pub coefficient: f64,
    pub p_value: f64,
    pub strength: CorrelationStrength,
}

/// Headline numbers plus the strongest, weakest and significant variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub symbol: String,
    pub city: String,
    pub timeframe: Timeframe,
    pub overall_correlation: f64,
    pub r_squared: f64,
    pub sample_size: usize,
    pub confidence_interval: [f64; 2],
    /// Largest absolute coefficient; the earliest variable wins ties
    pub strongest: VariableCorrelation,
    /// Smallest absolute coefficient; the earliest variable wins ties
    pub weakest: VariableCorrelation,
    /// Variables with p-value below the significance level
    pub significant: Vec<VariableCorrelation>,
}

impl CorrelationSummary {
    /// Summarises an analysis, treating `p < significance` as significant.
    #[must_use]
    pub fn from_analysis(analysis: &CorrelationAnalysis, significance: f64) -> Self {
        let all: Vec<VariableCorrelation> = analysis
            .results()
            .iter()
            .map(|(variable, result)| VariableCorrelation {
                variable: *variable,
                coefficient: result.coefficient,
                p_value: result.p_value,
                strength: result.strength,
            })
            .collect();

        let mut strongest = &all[0];
        let mut weakest = &all[0];
        for candidate in &all[1..] {
            if candidate.coefficient.abs() > strongest.coefficient.abs() {
                strongest = candidate;
            }
            if candidate.coefficient.abs() < weakest.coefficient.abs() {
                weakest = candidate;
            }
        }

        let strongest = strongest.clone();
        let weakest = weakest.clone();
        let significant = all
            .into_iter()
            .filter(|c| c.p_value < significance)
            .collect();

        Self {
            symbol: analysis.symbol.clone(),
            city: analysis.city.clone(),
            timeframe: analysis.timeframe,
            overall_correlation: analysis.overall_correlation,
            r_squared: analysis.r_squared,
            sample_size: analysis.sample_size,
            confidence_interval: analysis.confidence_interval,
            strongest,
            weakest,
            significant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::{CorrelationResult, PairCorrelation};
    use chrono::{TimeZone, Utc};

    fn result(coefficient: f64, p_value: f64) -> CorrelationResult {
        CorrelationResult::from_pair(PairCorrelation {
            coefficient,
            p_value,
        })
    }

    fn analysis(results: [(f64, f64); 5]) -> CorrelationAnalysis {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CorrelationAnalysis {
            symbol: "AAPL".to_string(),
            city: "NYC".to_string(),
            timeframe: Timeframe::OneMonth,
            start_date: ts,
            end_date: ts,
            temperature: result(results[0].0, results[0].1),
            precipitation: result(results[1].0, results[1].1),
            humidity: result(results[2].0, results[2].1),
            wind_speed: result(results[3].0, results[3].1),
            pressure: result(results[4].0, results[4].1),
            overall_correlation: 0.3,
            r_squared: 0.09,
            confidence_interval: [0.1, 0.5],
            sample_size: 25,
        }
    }

    #[test]
    fn strongest_and_weakest_use_magnitude() {
        let summary = CorrelationSummary::from_analysis(
            &analysis([
                (0.2, 0.3),
                (-0.65, 0.001),
                (0.05, 0.8),
                (0.4, 0.04),
                (-0.1, 0.6),
            ]),
            0.05,
        );

        assert_eq!(summary.strongest.variable, Variable::Precipitation);
        assert_eq!(summary.strongest.strength, CorrelationStrength::Moderate);
        assert_eq!(summary.weakest.variable, Variable::Humidity);
    }

    #[test]
    fn significant_filters_by_threshold_in_order() {
        let summary = CorrelationSummary::from_analysis(
            &analysis([
                (0.2, 0.3),
                (-0.65, 0.001),
                (0.05, 0.8),
                (0.4, 0.04),
                (-0.1, 0.05),
            ]),
            0.05,
        );

        let names: Vec<Variable> = summary.significant.iter().map(|c| c.variable).collect();
        assert_eq!(names, vec![Variable::Precipitation, Variable::WindSpeed]);
    }

    #[test]
    fn ties_resolve_to_earliest_variable() {
        let summary = CorrelationSummary::from_analysis(
            &analysis([(0.5, 0.1), (-0.5, 0.1), (0.0, 1.0), (0.0, 1.0), (0.5, 0.1)]),
            0.05,
        );

        assert_eq!(summary.strongest.variable, Variable::TemperatureAvg);
        assert_eq!(summary.weakest.variable, Variable::Humidity);
        assert!(summary.significant.is_empty());
    }

    #[test]
    fn carries_headline_metrics() {
        let summary = CorrelationSummary::from_analysis(
            &analysis([(0.1, 0.5); 5]),
            0.05,
        );

        assert_eq!(summary.symbol, "AAPL");
        assert_eq!(summary.sample_size, 25);
        assert_eq!(summary.confidence_interval, [0.1, 0.5]);
        assert!((summary.r_squared - 0.09).abs() < f64::EPSILON);
    }
}
