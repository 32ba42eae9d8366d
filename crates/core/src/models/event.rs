//! Extreme weather event categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of extreme weather that makes a day a candidate market event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ExtremeHeat,
    ExtremeCold,
    HeavyRain,
    HighWinds,
}

impl EventType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExtremeHeat => "extreme_heat",
            Self::ExtremeCold => "extreme_cold",
            Self::HeavyRain => "heavy_rain",
            Self::HighWinds => "high_winds",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
