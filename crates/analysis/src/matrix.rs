//! All-pairs correlation matrix over the aligned dataset.

use crate::align::{align, AlignedSample, Variable};
use crate::correlation::correlate;
use serde::{Deserialize, Serialize};
use weather_market_core::{StockObservation, WeatherObservation};

/// Square correlation and p-value matrices over a set of variables.
///
/// Row and column `i` both refer to `variables[i]`. Diagonal coefficients are
/// 1.0 and diagonal p-values 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<Variable>,
    pub matrix: Vec<Vec<f64>>,
    pub p_values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Coefficient between two variables, if both are in the matrix.
    #[must_use]
    pub fn coefficient(&self, a: Variable, b: Variable) -> Option<f64> {
        let (i, j) = self.indices(a, b)?;
        Some(self.matrix[i][j])
    }

    /// p-value between two variables, if both are in the matrix.
    #[must_use]
    pub fn p_value(&self, a: Variable, b: Variable) -> Option<f64> {
        let (i, j) = self.indices(a, b)?;
        Some(self.p_values[i][j])
    }

    fn indices(&self, a: Variable, b: Variable) -> Option<(usize, usize)> {
        let i = self.variables.iter().position(|v| *v == a)?;
        let j = self.variables.iter().position(|v| *v == b)?;
        Some((i, j))
    }
}

/// Aligns the two series and builds the matrix over all eight variables.
///
/// Returns an empty matrix when the series share no day.
#[must_use]
pub fn build_matrix(weather: &[WeatherObservation], stock: &[StockObservation]) -> CorrelationMatrix {
    let sample = align(weather, stock);

    if sample.is_empty() {
        tracing::debug!("No overlapping dates, returning empty correlation matrix");
        return CorrelationMatrix::default();
    }

    matrix_for_sample(&sample, &Variable::ALL)
}

/// Builds the matrix for the given variables over an aligned sample.
#[must_use]
pub fn matrix_for_sample(sample: &AlignedSample, variables: &[Variable]) -> CorrelationMatrix {
    let k = variables.len();
    let columns: Vec<Vec<f64>> = variables.iter().map(|v| sample.column(*v)).collect();

    let mut matrix = vec![vec![0.0; k]; k];
    let mut p_values = vec![vec![0.0; k]; k];

    for i in 0..k {
        matrix[i][i] = 1.0;
        for j in (i + 1)..k {
            let pair = correlate(&columns[i], &columns[j]);
            matrix[i][j] = pair.coefficient;
            matrix[j][i] = pair.coefficient;
            p_values[i][j] = pair.p_value;
            p_values[j][i] = pair.p_value;
        }
    }

    CorrelationMatrix {
        variables: variables.to_vec(),
        matrix,
        p_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn series(days: i64, offset: i64) -> (Vec<WeatherObservation>, Vec<StockObservation>) {
        let base = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();

        let weather = (0..days)
            .map(|i| {
                let x = i as f64;
                WeatherObservation::new(
                    base + Duration::days(i),
                    "Chicago",
                    20.0 + x,
                    (x * 1.3).sin().abs() * 10.0,
                    60.0 - x,
                    3.0 + (x * 0.7).cos(),
                    1010.0 + (x * 2.1).sin(),
                )
            })
            .collect();

        let stock = (0..days)
            .map(|i| {
                let open = Decimal::from(100 + i);
                let close = Decimal::from(101 + i * 2);
                StockObservation::new(
                    base + Duration::days(i + offset),
                    "SPY",
                    open,
                    close,
                    close,
                    open,
                    1_000 + (i as u64 % 3) * 250,
                )
            })
            .collect();

        (weather, stock)
    }

    #[test]
    fn no_overlap_yields_empty_matrix() {
        let (weather, stock) = series(5, 100);

        let matrix = build_matrix(&weather, &stock);

        assert!(matrix.is_empty());
        assert!(matrix.matrix.is_empty());
        assert!(matrix.p_values.is_empty());
    }

    #[test]
    fn matrix_is_square_over_all_variables() {
        let (weather, stock) = series(12, 0);

        let matrix = build_matrix(&weather, &stock);

        assert_eq!(matrix.variables, Variable::ALL.to_vec());
        assert_eq!(matrix.matrix.len(), 8);
        assert!(matrix.matrix.iter().all(|row| row.len() == 8));
        assert!(matrix.p_values.iter().all(|row| row.len() == 8));
    }

    #[test]
    fn diagonal_is_one_with_zero_p_value() {
        let (weather, stock) = series(12, 0);
        let matrix = build_matrix(&weather, &stock);

        for i in 0..8 {
            assert!((matrix.matrix[i][i] - 1.0).abs() < f64::EPSILON);
            assert!((matrix.p_values[i][i] - 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn matrix_is_symmetric() {
        let (weather, stock) = series(15, 0);
        let matrix = build_matrix(&weather, &stock);

        for i in 0..8 {
            for j in 0..8 {
                assert_eq!(matrix.matrix[i][j], matrix.matrix[j][i]);
                assert_eq!(matrix.p_values[i][j], matrix.p_values[j][i]);
            }
        }
    }

    #[test]
    fn off_diagonal_matches_pair_correlator() {
        let (weather, stock) = series(15, 0);
        let matrix = build_matrix(&weather, &stock);

        // Temperature rises one per day, close rises two per day.
        let r = matrix
            .coefficient(Variable::TemperatureAvg, Variable::ClosePrice)
            .unwrap();
        assert!((r - 1.0).abs() < 1e-9, "r was {r}");

        // Humidity falls one per day.
        let r = matrix
            .coefficient(Variable::Humidity, Variable::ClosePrice)
            .unwrap();
        assert!((r + 1.0).abs() < 1e-9, "r was {r}");

        let p = matrix
            .p_value(Variable::Humidity, Variable::ClosePrice)
            .unwrap();
        assert!(p < 1e-6, "p was {p}");
    }

    #[test]
    fn matrix_for_subset_of_variables() {
        let (weather, stock) = series(6, 0);
        let sample = align(&weather, &stock);

        let matrix = matrix_for_sample(&sample, &[Variable::Pressure, Variable::Volume]);

        assert_eq!(matrix.variables.len(), 2);
        assert!(matrix.coefficient(Variable::Pressure, Variable::Volume).is_some());
        assert!(matrix.coefficient(Variable::Pressure, Variable::Humidity).is_none());
    }

    #[test]
    fn serializes_variable_names() {
        let (weather, stock) = series(4, 0);
        let matrix = build_matrix(&weather, &stock);

        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["variables"][0], "temperature_avg");
        assert_eq!(json["variables"][7], "volume");
    }
}
