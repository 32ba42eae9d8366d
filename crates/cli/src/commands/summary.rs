//! Summary command: per-series statistics plus the correlation summary.

#![allow(clippy::format_push_string)]

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use weather_market_analysis::{
    analyze_with_confidence, CorrelationSummary, StockSummary, WeatherSummary,
};

use super::input::{load_input, LoadedInput, OutputFormat, SeriesArgs};

/// Arguments for the summary command.
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    weather: Option<WeatherSummary>,
    stock: Option<StockSummary>,
    correlation: CorrelationSummary,
}

/// Summarizes both series and the strongest, weakest and significant
/// weather variables.
pub fn run_summary(args: SummaryArgs) -> Result<()> {
    let input = load_input(&args.series)?;
    println!("{}", render(&input)?);
    Ok(())
}

fn render(input: &LoadedInput) -> Result<String> {
    let analysis = analyze_with_confidence(
        &input.weather,
        &input.stock,
        &input.request,
        input.config.analysis.confidence_level,
    )?;

    let output = SummaryOutput {
        weather: WeatherSummary::from_observations(&input.weather),
        stock: StockSummary::from_observations(&input.stock),
        correlation: CorrelationSummary::from_analysis(
            &analysis,
            input.config.analysis.significance_level,
        ),
    };

    match input.format {
        OutputFormat::Text => Ok(to_text(&output)),
        OutputFormat::Json => input.to_json(&output),
    }
}

fn to_text(output: &SummaryOutput) -> String {
    let mut text = String::new();
    let c = &output.correlation;

    text.push_str("═══════════════════════════════════════════════════════════════\n");
    text.push_str(&format!("  SUMMARY: {} vs {} ({})\n", c.symbol, c.city, c.timeframe));
    text.push_str("═══════════════════════════════════════════════════════════════\n");

    if let Some(w) = &output.weather {
        text.push_str("Weather\n");
        text.push_str("───────────────────────────────────────────────────────────────\n");
        text.push_str(&format!("Days:                  {}\n", w.data_points));
        text.push_str(&format!("Avg Temperature:       {:.1}°C\n", w.avg_temperature));
        text.push_str(&format!("Total Precipitation:   {:.1}mm\n", w.total_precipitation));
        text.push_str(&format!("Avg Humidity:          {:.1}%\n", w.avg_humidity));
        text.push_str(&format!("Avg Wind Speed:        {:.1} m/s\n", w.avg_wind_speed));
        if let Some(condition) = w.most_common_condition {
            text.push_str(&format!("Most Common:           {condition}\n"));
        }
        text.push('\n');
    }

    if let Some(s) = &output.stock {
        text.push_str("Stock\n");
        text.push_str("───────────────────────────────────────────────────────────────\n");
        text.push_str(&format!("Days:                  {}\n", s.data_points));
        text.push_str(&format!(
            "Price:                 {} -> {} ({:+.2}%)\n",
            s.start_price, s.end_price, s.total_return
        ));
        text.push_str(&format!("Range:                 {} - {}\n", s.min_price, s.max_price));
        text.push_str(&format!("Avg Volume:            {:.0}\n", s.avg_volume));
        text.push_str(&format!("Volatility:            {:.2}%\n", s.volatility));
        text.push('\n');
    }

    text.push_str("Correlation\n");
    text.push_str("───────────────────────────────────────────────────────────────\n");
    text.push_str(&format!("Overall:               {:.4}\n", c.overall_correlation));
    text.push_str(&format!(
        "Strongest:             {} ({:+.4}, {})\n",
        c.strongest.variable, c.strongest.coefficient, c.strongest.strength
    ));
    text.push_str(&format!(
        "Weakest:               {} ({:+.4}, {})\n",
        c.weakest.variable, c.weakest.coefficient, c.weakest.strength
    ));
    let significant: Vec<&str> = c.significant.iter().map(|v| v.variable.as_str()).collect();
    if significant.is_empty() {
        text.push_str("Significant:           none\n");
    } else {
        text.push_str(&format!("Significant:           {}\n", significant.join(", ")));
    }

    text
}
