//! Qualitative correlation strength buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket for the magnitude of a correlation coefficient.
///
/// Buckets are closed on their lower edge: `|r| < 0.3` is weak,
/// `0.3 <= |r| < 0.7` is moderate and `|r| >= 0.7` is strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Lower edge of the moderate bucket.
    pub const MODERATE_THRESHOLD: f64 = 0.3;
    /// Lower edge of the strong bucket.
    pub const STRONG_THRESHOLD: f64 = 0.7;

    /// Classifies a signed correlation coefficient by its magnitude.
    #[must_use]
    pub fn classify(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();

        if magnitude < Self::MODERATE_THRESHOLD {
            Self::Weak
        } else if magnitude < Self::STRONG_THRESHOLD {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
