//! chartsynth CLI - generate synthetic candle families from the command line

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use common::{LADDER, SeriesFamily, Timeframe};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sim::{DistributionChoice, GenerationParameters, generate, random_start_date};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Earliest date drawn by `--random-start-date`
const EARLIEST_START: (i32, u32, u32) = (1990, 1, 1);

#[derive(Parser)]
#[command(name = "chartsynth")]
#[command(about = "Synthetic OHLC candles with multi-timeframe resampling")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a series family
    Generate(GenerateArgs),
    /// Print the timeframe ladder
    Ladder {
        /// Series length used for the nominal bar counts
        #[arg(long, default_value_t = 120)]
        days: u64,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// JSON file with generation parameters; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    days: Option<u32>,

    #[arg(long)]
    start_price: Option<f64>,

    #[arg(long)]
    volatility: Option<f64>,

    /// random, normal, laplace or logistic
    #[arg(long)]
    distribution: Option<DistributionChoice>,

    #[arg(long)]
    seed: Option<u64>,

    /// Origin date, YYYY-MM-DD
    #[arg(long, conflicts_with = "random_start_date")]
    start_date: Option<NaiveDate>,

    /// Draw the origin date between 1990-01-01 and one year from today
    #[arg(long)]
    random_start_date: bool,

    #[arg(long)]
    ticks_per_candle: Option<u32>,

    /// Skip volatile period injection
    #[arg(long)]
    no_injection: bool,

    /// Timeframes to keep, e.g. 1D,1W
    #[arg(long, value_delimiter = ',')]
    timeframes: Vec<Timeframe>,

    /// Write the family to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Bincode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(true)
        .init();

    match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Ladder { days } => {
            print_ladder(days);
            Ok(())
        }
    }
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let params = build_parameters(args)?;
    info!(
        days = params.total_days,
        seed = params.random_seed,
        start_date = %params.start_date,
        "Parameters resolved"
    );

    let mut family = generate(&params).context("Failed to generate series family")?;
    if !args.timeframes.is_empty() {
        family.retain(&args.timeframes);
    }

    print_summary(&family);

    if let Some(path) = &args.output {
        write_family(&family, path, args.format)?;
        info!("Wrote {} timeframes to {}", family.len(), path.display());
    }

    Ok(())
}

fn build_parameters(args: &GenerateArgs) -> Result<GenerationParameters> {
    let mut params = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => GenerationParameters::default(),
    };

    if let Some(days) = args.days {
        params.total_days = days;
    }
    if let Some(start_price) = args.start_price {
        params.start_price = start_price;
    }
    if let Some(volatility) = args.volatility {
        params.volatility = volatility;
    }
    if let Some(distribution) = args.distribution {
        params.distribution = distribution;
    }
    if let Some(seed) = args.seed {
        params.random_seed = seed;
    }
    if let Some(start_date) = args.start_date {
        params.start_date = start_date;
    }
    if let Some(ticks) = args.ticks_per_candle {
        params.ticks_per_candle = ticks;
    }
    if args.no_injection {
        params.injection.enabled = false;
    }

    if args.random_start_date {
        let (year, month, day) = EARLIEST_START;
        let Some(earliest) = NaiveDate::from_ymd_opt(year, month, day) else {
            bail!("Invalid earliest start date");
        };
        let latest = Utc::now().date_naive() + Duration::days(365);
        let mut rng = StdRng::seed_from_u64(params.random_seed);
        params.start_date = random_start_date(&mut rng, earliest, latest);
    }

    Ok(params)
}

fn print_summary(family: &SeriesFamily) {
    println!("Price scale: {}", family.price_scale);
    for (timeframe, series) in family.iter() {
        match (series.first(), series.last(), series.price_range()) {
            (Some(first), Some(last), Some((low, high))) => println!(
                "{:>6} {:>7} candles  {} .. {}  low {:.4}  high {:.4}",
                timeframe.label(),
                series.len(),
                first.timestamp.format("%Y-%m-%d %H:%M"),
                last.timestamp.format("%Y-%m-%d %H:%M"),
                low,
                high
            ),
            _ => println!("{:>6} {:>7} candles", timeframe.label(), 0),
        }
    }
}

fn write_family(family: &SeriesFamily, path: &Path, format: OutputFormat) -> Result<()> {
    let bytes = match format {
        OutputFormat::Json => serde_json::to_vec_pretty(family).context("Failed to encode family as JSON")?,
        OutputFormat::Bincode => bincode::serialize(family).context("Failed to encode family as bincode")?,
    };
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_ladder(days: u64) {
    println!("{:>6}  {:>6}  {:>8}", "level", "from", "bars");
    for timeframe in LADDER {
        let source = timeframe.finer().map_or("walk", Timeframe::label);
        println!("{:>6}  {:>6}  {:>8}", timeframe.label(), source, timeframe.nominal_bars(days));
    }
}
