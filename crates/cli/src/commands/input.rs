//! Arguments and loading shared by every analysis command.
//!
//! Each command reads one weather series and one stock series from disk,
//! restricts both to the requested window, and renders its result as text
//! or JSON.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use weather_market_analysis::AnalysisRequest;
use weather_market_core::{
    parse_date, validate_date_range, AppConfig, ConfigLoader, StockObservation, Timeframe,
    WeatherObservation,
};
use weather_market_data::{load_stock_series, load_weather_series};

/// Series files, identifiers and window shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Weather observations file (.csv or .json)
    #[arg(long)]
    pub weather: String,

    /// Stock observations file (.csv or .json)
    #[arg(long)]
    pub stock: String,

    /// Ticker symbol reported in the output
    #[arg(long, default_value = "AAPL")]
    pub symbol: String,

    /// City reported in the output
    #[arg(long, default_value = "New York")]
    pub city: String,

    /// Lookback window: 1w, 1m, 3m, 1y (unknown values mean 1m)
    #[arg(long, default_value = "1m")]
    pub timeframe: String,

    /// Window start (YYYY-MM-DD); defaults to end minus the timeframe
    #[arg(long)]
    pub start: Option<String>,

    /// Window end (YYYY-MM-DD); defaults to the latest observation
    #[arg(long)]
    pub end: Option<String>,

    /// Output format: text, json (defaults to the configured format)
    #[arg(long)]
    pub format: Option<String>,

    /// TOML config file layered over the built-in defaults
    /// (otherwise config/Config.toml and APP_ env vars)
    #[arg(long, env = "WEATHER_MARKET_CONFIG")]
    pub config: Option<String>,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

/// Everything a command needs after the files are read.
#[derive(Debug)]
pub struct LoadedInput {
    pub config: AppConfig,
    pub request: AnalysisRequest,
    pub weather: Vec<WeatherObservation>,
    pub stock: Vec<StockObservation>,
    pub format: OutputFormat,
}

impl LoadedInput {
    /// Serializes `value` honouring the configured pretty-print flag.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.config.output.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

/// Loads config and both series, then trims them to the analysis window.
pub fn load_input(args: &SeriesArgs) -> Result<LoadedInput> {
    load_input_at(args, Utc::now())
}

fn load_input_at(args: &SeriesArgs, now: DateTime<Utc>) -> Result<LoadedInput> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };

    let format = OutputFormat::parse(args.format.as_deref().unwrap_or(&config.output.format))?;
    let timeframe: Timeframe = args.timeframe.parse().unwrap_or_default();

    let weather = load_weather_series(&args.weather)?;
    let stock = load_stock_series(&args.stock)?;

    let end = match &args.end {
        Some(s) => parse_date(s).with_context(|| format!("Invalid --end date: {s}"))?,
        None => latest_date(&weather, &stock).unwrap_or(now),
    };
    let start = match &args.start {
        Some(s) => parse_date(s).with_context(|| format!("Invalid --start date: {s}"))?,
        None => timeframe.date_range(end).0,
    };

    if !validate_date_range(start, end, now) {
        bail!(
            "Invalid date range {} to {}: start must precede end, span at most two years, and end no later than today",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
    }

    let weather: Vec<_> = weather
        .into_iter()
        .filter(|w| within(w.calendar_date(), start, end))
        .collect();
    let stock: Vec<_> = stock
        .into_iter()
        .filter(|s| within(s.calendar_date(), start, end))
        .collect();

    tracing::info!(
        "Loaded {} weather and {} stock observations for {} to {}",
        weather.len(),
        stock.len(),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    let request = AnalysisRequest::new(&args.symbol, &args.city, timeframe, start, end);

    Ok(LoadedInput {
        config,
        request,
        weather,
        stock,
        format,
    })
}

fn latest_date(
    weather: &[WeatherObservation],
    stock: &[StockObservation],
) -> Option<DateTime<Utc>> {
    weather
        .iter()
        .map(|w| w.date)
        .chain(stock.iter().map(|s| s.date))
        .max()
}

// Whole calendar days on both ends.
fn within(day: chrono::NaiveDate, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    day >= start.date_naive() && day <= end.date_naive()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use weather_market_data::CsvStorage;

    pub(crate) fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap() + Duration::days(offset)
    }

    pub(crate) fn write_series(days: i64) -> (NamedTempFile, NamedTempFile) {
        let weather: Vec<_> = (0..days)
            .map(|i| {
                let x = i as f64;
                WeatherObservation::new(
                    day(i),
                    "Chicago",
                    2.0 + x,
                    (x * 1.7).sin().abs() * 5.0,
                    60.0 + (x * 0.9).cos() * 8.0,
                    4.0 + (x * 0.4).sin(),
                    1010.0 + (x * 2.1).cos() * 3.0,
                )
            })
            .collect();
        let stock: Vec<_> = (0..days)
            .map(|i| {
                let open = Decimal::from(100 + 2 * i);
                let close = Decimal::from(101 + 2 * i);
                StockObservation::new(
                    day(i),
                    "MSFT",
                    open,
                    close,
                    close,
                    open,
                    1_000_000 + i as u64,
                )
            })
            .collect();

        let weather_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let stock_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        CsvStorage::write_weather(weather_file.path(), &weather).unwrap();
        CsvStorage::write_stock(stock_file.path(), &stock).unwrap();
        (weather_file, stock_file)
    }

    pub(crate) fn series_args(weather: &NamedTempFile, stock: &NamedTempFile) -> SeriesArgs {
        SeriesArgs {
            weather: weather.path().display().to_string(),
            stock: stock.path().display().to_string(),
            symbol: "MSFT".to_string(),
            city: "Chicago".to_string(),
            timeframe: "1m".to_string(),
            start: None,
            end: None,
            format: None,
            config: None,
        }
    }

    // ============================================
    // Output Format Tests
    // ============================================

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("TXT").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("Json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("xml").is_err());
    }

    // ============================================
    // Loading Tests
    // ============================================

    #[test]
    fn test_window_ends_at_latest_observation() {
        let (weather, stock) = write_series(45);
        let args = series_args(&weather, &stock);

        let input = load_input_at(&args, day(100)).unwrap();

        // 1m window ending on day 44 covers days 14..=44
        assert_eq!(input.weather.len(), 31);
        assert_eq!(input.stock.len(), 31);
        assert_eq!(input.request.end_date, day(44));
        assert_eq!(input.request.timeframe, Timeframe::OneMonth);
        assert_eq!(input.format, OutputFormat::Text);
    }

    #[test]
    fn test_explicit_window() {
        let (weather, stock) = write_series(20);
        let mut args = series_args(&weather, &stock);
        args.start = Some("2025-03-03".to_string());
        args.end = Some("2025-03-07".to_string());
        args.format = Some("json".to_string());

        let input = load_input_at(&args, day(100)).unwrap();

        assert_eq!(input.weather.len(), 5);
        assert_eq!(input.stock.len(), 5);
        assert_eq!(input.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_inverted_window() {
        let (weather, stock) = write_series(10);
        let mut args = series_args(&weather, &stock);
        args.start = Some("2025-03-07".to_string());
        args.end = Some("2025-03-03".to_string());

        assert!(load_input_at(&args, day(100)).is_err());
    }

    #[test]
    fn test_rejects_future_end() {
        let (weather, stock) = write_series(10);
        let args = series_args(&weather, &stock);

        // "now" before the last observation puts the window end in the future
        assert!(load_input_at(&args, day(5)).is_err());
    }

    #[test]
    fn test_config_file_overrides_output() {
        let (weather, stock) = write_series(10);
        let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(config, "[output]\nformat = \"json\"\npretty = false").unwrap();

        let mut args = series_args(&weather, &stock);
        args.config = Some(config.path().display().to_string());

        let input = load_input_at(&args, day(100)).unwrap();

        assert_eq!(input.format, OutputFormat::Json);
        assert!(!input.config.output.pretty);
        assert!(!input.to_json(&vec![1, 2]).unwrap().contains('\n'));
    }

    #[test]
    fn test_missing_file_is_error() {
        let (weather, _stock) = write_series(3);
        let mut args = series_args(&weather, &weather);
        args.stock = "/nonexistent/stock.csv".to_string();

        assert!(load_input_at(&args, day(100)).is_err());
    }
}
