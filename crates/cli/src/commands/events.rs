//! Events command: extreme-weather days and same-day market moves.

#![allow(clippy::format_push_string)]

use anyhow::Result;
use clap::Args;

use weather_market_analysis::{detect_events_with, SignificantEvent};

use super::input::{load_input, LoadedInput, OutputFormat, SeriesArgs};

/// Arguments for the events command.
#[derive(Args, Debug, Clone)]
pub struct EventsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Maximum number of events to list (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Detects extreme-weather days and prints them by descending market impact.
pub fn run_events(args: EventsArgs) -> Result<()> {
    let input = load_input(&args.series)?;
    println!("{}", render(&input, args.limit)?);
    Ok(())
}

fn render(input: &LoadedInput, limit: Option<usize>) -> Result<String> {
    let mut thresholds = input.config.events.clone();
    if let Some(limit) = limit {
        thresholds.max_events = limit;
    }
    let events = detect_events_with(&input.weather, &input.stock, &thresholds);

    match input.format {
        OutputFormat::Text => Ok(events_to_text(&events)),
        OutputFormat::Json => input.to_json(&events),
    }
}

fn events_to_text(events: &[SignificantEvent]) -> String {
    if events.is_empty() {
        return "No extreme weather days with market data.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<14} {:<28} {:>10}\n",
        "Date", "Type", "Description", "Change"
    ));
    for event in events {
        output.push_str(&format!(
            "{:<12} {:<14} {:<28} {:>+9.2}%\n",
            event.date.format("%Y-%m-%d").to_string(),
            event.event_type.as_str(),
            event.description,
            event.market_impact
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::input::tests::{series_args, write_series};
    use std::io::Write;

    fn low_heat_config() -> tempfile::NamedTempFile {
        let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(config, "[events]\nextreme_heat = 10.0").unwrap();
        config
    }

    #[test]
    fn test_events_from_configured_threshold() {
        // Days 9..=19 exceed 10.0; the default limit keeps ten of them
        let (weather, stock) = write_series(20);
        let config = low_heat_config();
        let mut args = series_args(&weather, &stock);
        args.config = Some(config.path().display().to_string());
        let input = load_input(&args).unwrap();

        let text = render(&input, None).unwrap();

        assert!(text.contains("extreme_heat"));
        assert_eq!(text.lines().count(), 11);
    }

    #[test]
    fn test_limit_caps_events() {
        let (weather, stock) = write_series(20);
        let config = low_heat_config();
        let mut args = series_args(&weather, &stock);
        args.config = Some(config.path().display().to_string());
        args.format = Some("json".to_string());
        let input = load_input(&args).unwrap();

        let json = render(&input, Some(3)).unwrap();
        let events: Vec<SignificantEvent> = serde_json::from_str(&json).unwrap();

        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_no_events_message() {
        let (weather, stock) = write_series(10);
        let args = series_args(&weather, &stock);
        let input = load_input(&args).unwrap();

        assert!(render(&input, None).unwrap().starts_with("No extreme weather"));
    }
}
