use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use candle_csv_core::{Candle, ParseOptions};
use candle_csv_io::{CandleSink, FileSource, JsonSink, load_and_render, load_candles};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "candle-csv",
    about = "Load OHLC candle CSV files into chart-ready JSON"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and write the candle series as JSON
    Load {
        /// CSV file: header row, then timestamp,open,high,low,close[,...]
        file: PathBuf,

        /// IANA time zone for timestamps without an offset
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Log a warning for every row with unparseable fields
        #[arg(long)]
        warn_malformed: bool,
    },

    /// Summarize the candles in a CSV file
    Inspect {
        /// CSV file: header row, then timestamp,open,high,low,close[,...]
        file: PathBuf,

        /// IANA time zone for timestamps without an offset
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
}

#[derive(Debug, PartialEq)]
struct Summary {
    count: usize,
    incomplete: usize,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
}

fn summarize(candles: &[Candle]) -> Summary {
    let times: Vec<DateTime<Utc>> = candles.iter().filter_map(Candle::datetime).collect();
    Summary {
        count: candles.len(),
        incomplete: candles.iter().filter(|c| !c.is_complete()).count(),
        first: times.iter().min().copied(),
        last: times.iter().max().copied(),
    }
}

fn parse_options(timezone: &str, warn_malformed: bool) -> Result<ParseOptions> {
    Ok(ParseOptions::with_timezone_name(timezone)
        .context("invalid --timezone")?
        .warn_malformed(warn_malformed))
}

async fn cmd_load(
    file: &Path,
    options: &ParseOptions,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let source = FileSource::new(file);
    let sink = match output {
        Some(path) => JsonSink::file(path),
        None => JsonSink::stdout(),
    }
    .pretty(pretty);

    if let Some(count) = load_and_render(&source, &sink, options).await {
        info!("wrote {count} candle(s) to {}", sink.name());
    }
    Ok(())
}

async fn cmd_inspect(file: &Path, options: &ParseOptions) -> Result<()> {
    let candles = match load_candles(&FileSource::new(file), options).await {
        Ok(candles) => candles,
        Err(e) => {
            error!("Error reading file: {e}");
            return Ok(());
        }
    };

    let summary = summarize(&candles);
    println!("{}: {} candle(s)", file.display(), summary.count);
    match (summary.first, summary.last) {
        (Some(first), Some(last)) => println!("span: {first} to {last}"),
        _ => println!("span: none"),
    }
    if summary.incomplete > 0 {
        println!("{} candle(s) with unparseable fields", summary.incomplete);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    match &cli.command {
        Commands::Load {
            file,
            timezone,
            output,
            pretty,
            warn_malformed,
        } => {
            let options = parse_options(timezone, *warn_malformed)?;
            cmd_load(file, &options, output.as_deref(), *pretty).await?;
        }
        Commands::Inspect { file, timezone } => {
            let options = parse_options(timezone, false)?;
            cmd_inspect(file, &options).await?;
        }
    }

    Ok(())
}
