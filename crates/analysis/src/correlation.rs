//! Pearson correlation with two-sided significance.
//!
//! Degenerate inputs never fail: short or constant series and numerical
//! breakdowns resolve to a coefficient of 0.0 with a p-value of 1.0.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use weather_market_core::CorrelationStrength;

/// Coefficient and p-value for one pair of series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairCorrelation {
    /// Pearson correlation coefficient [-1, 1]
    pub coefficient: f64,
    /// Two-tailed p-value [0, 1]
    pub p_value: f64,
}

impl PairCorrelation {
    /// Result reported when no meaningful correlation can be computed.
    pub const DEGENERATE: Self = Self {
        coefficient: 0.0,
        p_value: 1.0,
    };
}

/// Correlation of a weather variable against the market, with its strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub p_value: f64,
    pub strength: CorrelationStrength,
}

impl CorrelationResult {
    #[must_use]
    pub fn from_pair(pair: PairCorrelation) -> Self {
        Self {
            coefficient: pair.coefficient,
            p_value: pair.p_value,
            strength: classify_strength(pair.coefficient),
        }
    }

    /// Returns true if the correlation is significant at the given alpha.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Maps a coefficient to its qualitative strength bucket.
#[must_use]
pub fn classify_strength(coefficient: f64) -> CorrelationStrength {
    CorrelationStrength::classify(coefficient)
}

/// Computes the Pearson coefficient of `x` and `y` and its two-sided p-value.
///
/// The p-value comes from the Student-t distribution with `n - 2` degrees of
/// freedom applied to `t = r * sqrt(n - 2) / sqrt(1 - r^2)`. With exactly two
/// points the coefficient is reported but the p-value is 1.0.
#[must_use]
pub fn correlate(x: &[f64], y: &[f64]) -> PairCorrelation {
    if x.len() != y.len() || x.len() < 2 {
        return PairCorrelation::DEGENERATE;
    }

    if is_constant(x) || is_constant(y) {
        tracing::debug!("Zero-variance input, correlation undefined");
        return PairCorrelation::DEGENERATE;
    }

    let Some(r) = pearson_correlation(x, y) else {
        tracing::warn!(n = x.len(), "Pearson correlation failed numerically");
        return PairCorrelation::DEGENERATE;
    };

    match correlation_p_value(r, x.len()) {
        Some(p_value) => PairCorrelation {
            coefficient: r,
            p_value,
        },
        None => {
            tracing::warn!(r, n = x.len(), "Correlation p-value failed numerically");
            PairCorrelation::DEGENERATE
        }
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson coefficient via centred sums. `None` if the result is not finite.
fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if !denominator.is_finite() || denominator <= 0.0 {
        return None;
    }

    let r = covariance / denominator;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Two-sided p-value for a coefficient over `n` samples.
fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return Some(1.0);
    }

    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        // Perfect linear relationship: t is unbounded.
        return Some(0.0);
    }

    let df = (n - 2) as f64;
    let t_stat = r * df.sqrt() / one_minus_r2.sqrt();

    let t_dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p = 2.0 * t_dist.sf(t_stat.abs());

    p.is_finite().then(|| p.clamp(0.0, 1.0))
}
