//! Confidence intervals for correlation coefficients via Fisher's z-transformation.

use statrs::distribution::{ContinuousCDF, Normal};

/// Default confidence level for correlation intervals.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Interval reported when no valid interval can be computed.
pub const DEGENERATE_INTERVAL: [f64; 2] = [0.0, 0.0];

/// Computes a two-sided confidence interval for a correlation coefficient.
///
/// `z = atanh(r)`, `se = 1 / sqrt(n - 3)`, bounds `tanh(z -/+ z_crit * se)`.
/// Returns `[0.0, 0.0]` when `n <= 3` (the standard error is unbounded), when
/// `|r| >= 1`, when the confidence level is outside (0, 1), or when any
/// intermediate value is not finite.
#[must_use]
pub fn confidence_interval(correlation: f64, sample_size: usize, confidence: f64) -> [f64; 2] {
    if sample_size <= 3 {
        return DEGENERATE_INTERVAL;
    }

    match fisher_interval(correlation, sample_size, confidence) {
        Some(interval) => interval,
        None => {
            tracing::warn!(
                correlation,
                sample_size,
                confidence,
                "Confidence interval undefined, using degenerate interval"
            );
            DEGENERATE_INTERVAL
        }
    }
}

fn fisher_interval(r: f64, n: usize, confidence: f64) -> Option<[f64; 2]> {
    if !(confidence > 0.0 && confidence < 1.0) || !r.is_finite() || r.abs() >= 1.0 {
        return None;
    }

    let z = 0.5 * ((1.0 + r) / (1.0 - r)).ln();
    let se = 1.0 / ((n - 3) as f64).sqrt();

    let z_critical = critical_value(confidence)?;

    let lower = inverse_fisher(z - z_critical * se);
    let upper = inverse_fisher(z + z_critical * se);

    (lower.is_finite() && upper.is_finite()).then_some([lower, upper])
}

/// Two-sided standard normal quantile for a confidence level.
fn critical_value(confidence: f64) -> Option<f64> {
    let alpha = 1.0 - confidence;
    let normal = Normal::new(0.0, 1.0).ok()?;
    let z = normal.inverse_cdf(1.0 - alpha / 2.0);
    z.is_finite().then_some(z)
}

/// Maps a z-space bound back to correlation space: `(e^{2z} - 1) / (e^{2z} + 1)`.
fn inverse_fisher(z: f64) -> f64 {
    z.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_brackets_coefficient() {
        let [lower, upper] = confidence_interval(0.5, 30, DEFAULT_CONFIDENCE);

        assert!(lower < 0.5 && 0.5 < upper, "interval was [{lower}, {upper}]");
        assert!((-1.0..=1.0).contains(&lower));
        assert!((-1.0..=1.0).contains(&upper));
        // Reference: [0.1704, 0.7290]
        assert!((lower - 0.1704).abs() < 1e-3, "lower was {lower}");
        assert!((upper - 0.7290).abs() < 1e-3, "upper was {upper}");
    }

    #[test]
    fn critical_value_for_95_percent() {
        let z = critical_value(0.95).unwrap();
        assert!((z - 1.959_964).abs() < 1e-5, "z was {z}");
    }

    #[test]
    fn higher_confidence_widens_interval() {
        let [l95, u95] = confidence_interval(0.3, 50, 0.95);
        let [l99, u99] = confidence_interval(0.3, 50, 0.99);

        assert!(l99 < l95);
        assert!(u99 > u95);
    }

    #[test]
    fn larger_sample_narrows_interval() {
        let [l_small, u_small] = confidence_interval(0.4, 20, DEFAULT_CONFIDENCE);
        let [l_big, u_big] = confidence_interval(0.4, 500, DEFAULT_CONFIDENCE);

        assert!(u_big - l_big < u_small - l_small);
    }

    #[test]
    fn small_sample_returns_degenerate() {
        assert_eq!(confidence_interval(0.5, 0, 0.95), DEGENERATE_INTERVAL);
        assert_eq!(confidence_interval(0.5, 2, 0.95), DEGENERATE_INTERVAL);
    }

    #[test]
    fn perfect_correlation_returns_degenerate() {
        assert_eq!(confidence_interval(1.0, 30, 0.95), DEGENERATE_INTERVAL);
        assert_eq!(confidence_interval(-1.0, 30, 0.95), DEGENERATE_INTERVAL);
    }

    #[test]
    fn invalid_confidence_returns_degenerate() {
        assert_eq!(confidence_interval(0.5, 30, 1.0), DEGENERATE_INTERVAL);
        assert_eq!(confidence_interval(0.5, 30, 0.0), DEGENERATE_INTERVAL);
        assert_eq!(confidence_interval(f64::NAN, 30, 0.95), DEGENERATE_INTERVAL);
    }

    #[test]
    fn three_samples_return_degenerate() {
        assert_eq!(confidence_interval(0.5, 3, DEFAULT_CONFIDENCE), DEGENERATE_INTERVAL);

        let [lower, upper] = confidence_interval(0.5, 4, DEFAULT_CONFIDENCE);
        assert!(lower < 0.5 && 0.5 < upper, "interval was [{lower}, {upper}]");
    }

    #[test]
    fn zero_correlation_interval_is_symmetric() {
        let [lower, upper] = confidence_interval(0.0, 40, DEFAULT_CONFIDENCE);
        assert!((lower + upper).abs() < 1e-12);
    }
}
