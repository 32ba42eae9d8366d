use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub events: EventThresholds,
    pub output: OutputConfig,
}

/// Statistical parameters for correlation analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level for the overall-correlation interval
    pub confidence_level: f64,
    /// p-value below which a correlation is reported as significant
    pub significance_level: f64,
}

/// Thresholds that classify a day as extreme weather.
///
/// Checks are strict comparisons applied in the order heat, cold, rain, wind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventThresholds {
    /// Average temperature above which a day is extreme heat (Celsius)
    pub extreme_heat: f64,
    /// Average temperature below which a day is extreme cold (Celsius)
    pub extreme_cold: f64,
    /// Precipitation above which a day is heavy rain (mm)
    pub heavy_rain: f64,
    /// Wind speed above which a day has high winds (m/s)
    pub high_winds: f64,
    /// Maximum number of events reported
    pub max_events: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for the CLI: "text" or "json"
    pub format: String,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            significance_level: 0.05,
        }
    }
}

impl Default for EventThresholds {
    fn default() -> Self {
        Self {
            extreme_heat: 35.0,
            extreme_cold: -10.0,
            heavy_rain: 50.0,
            high_winds: 20.0,
            max_events: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let level = self.analysis.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            bail!("analysis.confidence_level must be in (0, 1), got {level}");
        }

        let alpha = self.analysis.significance_level;
        if !(alpha > 0.0 && alpha < 1.0) {
            bail!("analysis.significance_level must be in (0, 1), got {alpha}");
        }

        if self.events.max_events == 0 {
            bail!("events.max_events must be at least 1");
        }

        if self.events.extreme_cold >= self.events.extreme_heat {
            bail!(
                "events.extreme_cold ({}) must be below events.extreme_heat ({})",
                self.events.extreme_cold,
                self.events.extreme_heat
            );
        }

        Ok(())
    }
}
