use clap::{Parser, Subcommand};

mod commands;

use commands::{
    run_analyze, run_events, run_matrix, run_summary, AnalyzeArgs, EventsArgs, MatrixArgs,
    SummaryArgs,
};

#[derive(Parser)]
#[command(name = "weather-market")]
#[command(about = "Correlate weather observations with stock market performance", long_about = None)]
struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate each weather variable with the closing price
    Analyze(AnalyzeArgs),
    /// Print the all-pairs correlation matrix
    Matrix(MatrixArgs),
    /// List extreme-weather days ranked by market impact
    Events(EventsArgs),
    /// Summarize both series and their strongest relationships
    Summary(SummaryArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Analyze(args) => run_analyze(args)?,
        Commands::Matrix(args) => run_matrix(args)?,
        Commands::Events(args) => run_events(args)?,
        Commands::Summary(args) => run_summary(args)?,
    }

    Ok(())
}
