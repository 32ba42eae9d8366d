//! Matrix command: all-pairs correlation table.

use anyhow::Result;
use clap::Args;

use weather_market_analysis::{build_matrix, matrix_to_text};

use super::input::{load_input, LoadedInput, OutputFormat, SeriesArgs};

/// Arguments for the matrix command.
#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

/// Builds the correlation matrix and prints it. An empty overlap prints an
/// empty matrix rather than failing.
pub fn run_matrix(args: MatrixArgs) -> Result<()> {
    let input = load_input(&args.series)?;
    println!("{}", render(&input)?);
    Ok(())
}

fn render(input: &LoadedInput) -> Result<String> {
    let matrix = build_matrix(&input.weather, &input.stock);

    match input.format {
        OutputFormat::Text => Ok(matrix_to_text(&matrix)),
        OutputFormat::Json => input.to_json(&matrix),
    }
}
