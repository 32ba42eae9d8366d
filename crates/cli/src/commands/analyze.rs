//! Analyze command: headline correlation report.

use anyhow::Result;
use clap::Args;

use weather_market_analysis::CorrelationReport;

use super::input::{load_input, LoadedInput, OutputFormat, SeriesArgs};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

/// Runs the full report and prints it.
pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let input = load_input(&args.series)?;
    println!("{}", render(&input)?);
    Ok(())
}

fn render(input: &LoadedInput) -> Result<String> {
    let report =
        CorrelationReport::generate(&input.weather, &input.stock, &input.request, &input.config)?;

    match input.format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => input.to_json(&report),
    }
}
