//! Analysis timeframes and date-range helpers.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest date range accepted for a single analysis.
pub const MAX_RANGE_DAYS: i64 = 730;

/// Look-back window for an analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1w")]
    OneWeek,
    #[default]
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Timeframe {
    /// Number of calendar days covered by the timeframe.
    #[must_use]
    pub const fn days(&self) -> i64 {
        match self {
            Self::OneWeek => 7,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::OneYear => 365,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
            Self::OneYear => "1y",
        }
    }

    /// Date range ending at `now` and reaching back by the timeframe length.
    #[must_use]
    pub fn date_range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.days()), now)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = std::convert::Infallible;

    /// Unrecognised labels fall back to one month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "1w" => Self::OneWeek,
            "3m" => Self::ThreeMonths,
            "1y" => Self::OneYear,
            _ => Self::OneMonth,
        })
    }
}

/// Returns true if `start..end` is a usable analysis window.
///
/// The range must be non-empty, no longer than [`MAX_RANGE_DAYS`], and must
/// not end after `now`.
#[must_use]
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    if start >= end {
        return false;
    }

    if (end - start).num_days() > MAX_RANGE_DAYS {
        return false;
    }

    end <= now
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or an RFC 3339 timestamp as UTC.
///
/// # Errors
/// Returns an error if the string matches none of the accepted formats.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| anyhow!("Invalid date format: {}", s))
}
