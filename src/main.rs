//! swap-balancer CLI
//!
//! Generate the interest rate swap trades that bring a trade book to
//! zero-sum notional and cashflow.
//!
//! # Usage
//!
//! ```bash
//! # Balance a book with the default rate bounds [-0.1, 0.1]
//! swap-balancer balance trades.csv
//!
//! # Choose the rates used when two trades are needed
//! swap-balancer balance trades.csv --rates 0.05 -0.02
//!
//! # Several books at once, as JSON, with info logging
//! swap-balancer -l 20 balance book1.csv book2.csv --format json
//!
//! # Write a random book for testing
//! swap-balancer generate --trades 1000 --seed 7 --output book.csv
//! ```

use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn, LevelFilter};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use swap_balancer::balancing::balancer::{Balance, Balancer};
use swap_balancer::balancing::config::{BalancerConfig, CandidateRates, RateBounds};
use swap_balancer::core::error::BalanceError;
use swap_balancer::io::reader::aggregate_file;
use swap_balancer::io::report::{write_json, write_text, BalanceReport, OutputFormat};
use swap_balancer::io::writer::write_trades;
use swap_balancer::io::InputError;
use swap_balancer::simulation::random_trades::{generate_random_trades, TradeGenConfig};
use thiserror::Error;

/// Generate the 1 or 2 interest rate swap trades needed to achieve
/// zero-sum notional and cashflow.
#[derive(Parser)]
#[command(name = "swap-balancer", version, about)]
struct Cli {
    /// Log level (debug: 10, info: 20, warning: 30, error: 40, critical: 50)
    #[arg(short, long, default_value_t = 30, global = true)]
    log_level: u8,

    /// Debug logging, same as `--log-level 10`; overrides --log-level
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the trades that balance one or more CSV trade files
    Balance(BalanceArgs),
    /// Write a random trade book as CSV
    Generate(GenerateArgs),
}

#[derive(Args)]
struct BalanceArgs {
    /// CSV files with notional and rate columns
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Minimum allowed trade rate
    #[arg(long, default_value = "-0.1", allow_negative_numbers = true)]
    min_rate: Decimal,

    /// Maximum allowed trade rate
    #[arg(long, default_value = "0.1", allow_negative_numbers = true)]
    max_rate: Decimal,

    /// Rates of the two trades when one is not enough. They must differ and
    /// lie within [min-rate, max-rate]. Default: [max, max - 0.1 * (max - min)]
    #[arg(
        long,
        num_args = 2,
        value_names = ["R1", "R2"],
        allow_negative_numbers = true
    )]
    rates: Option<Vec<Decimal>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of trades
    #[arg(long, default_value_t = 100)]
    trades: usize,

    /// Smallest absolute notional
    #[arg(long, default_value = "1000")]
    min_notional: Decimal,

    /// Largest absolute notional
    #[arg(long, default_value = "1000000")]
    max_notional: Decimal,

    /// Minimum trade rate
    #[arg(long, default_value = "-0.1", allow_negative_numbers = true)]
    min_rate: Decimal,

    /// Maximum trade rate
    #[arg(long, default_value = "0.1", allow_negative_numbers = true)]
    max_rate: Decimal,

    /// Seed for a reproducible book
    #[arg(long)]
    seed: Option<u64>,

    /// Write to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: InputError,
    },
    #[error("{0}")]
    Balance(#[from] BalanceError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
    #[error("cannot write json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Map the numeric levels of `--log-level` onto `log` filters.
fn level_filter(level: u8) -> LevelFilter {
    match level {
        0..=9 => LevelFilter::Trace,
        10..=19 => LevelFilter::Debug,
        20..=29 => LevelFilter::Info,
        30..=39 => LevelFilter::Warn,
        _ => LevelFilter::Error,
    }
}

fn balancer_from_args(args: &BalanceArgs) -> Result<Balancer, BalanceError> {
    let bounds = RateBounds::new(args.min_rate, args.max_rate)?;
    let mut rates = args.rates.iter().flatten().copied();
    let candidates = CandidateRates::from_pair(rates.next(), rates.next())?;
    let config = BalancerConfig::new(bounds, candidates)?;
    debug!("balancer config: {:?}", config);
    Ok(Balancer::new(config))
}

fn balance_file(balancer: &Balancer, path: &Path) -> Result<Balance, CliError> {
    let input_error = |source: InputError| CliError::Input {
        path: path.to_path_buf(),
        source,
    };

    let aggregate = aggregate_file(path).map_err(input_error)?;
    info!(
        "{}: {} trades, notional_sum={} cashflow_sum={}",
        path.display(),
        aggregate.count(),
        aggregate.notional_sum(),
        aggregate.cashflow_sum()
    );

    let balance = balancer.balance_aggregate(&aggregate).map_err(|e| match e {
        BalanceError::Validation(v) => input_error(InputError::Validation(v)),
        other => CliError::Balance(other),
    })?;

    match balance.required_rate {
        Some(rate) => info!("single-trade rate {:.8}: {}", rate, balance.resolution),
        None => info!("single-trade rate undefined: {}", balance.resolution),
    }
    if balance.verification.is_zero_sum() {
        info!(
            "final notional_sum={} cashflow_sum={}",
            balance.verification.notional_total, balance.verification.cashflow_total
        );
    } else {
        warn!(
            "{}: totals not within tolerance after balancing: notional_sum={} cashflow_sum={}",
            path.display(),
            balance.verification.notional_total,
            balance.verification.cashflow_total
        );
    }
    Ok(balance)
}

fn cmd_balance(args: BalanceArgs) -> Result<(), CliError> {
    let balancer = balancer_from_args(&args)?;

    let balances = args
        .files
        .iter()
        .map(|path| balance_file(&balancer, path))
        .collect::<Result<Vec<_>, _>>()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            let multiple = balances.len() > 1;
            for (path, balance) in args.files.iter().zip(&balances) {
                if multiple {
                    writeln!(out, "{}", path.display())?;
                }
                write_text(&mut out, balance)?;
            }
        }
        OutputFormat::Json => {
            let sources: Vec<String> = args
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            let reports: Vec<BalanceReport<'_>> = sources
                .iter()
                .zip(&balances)
                .map(|(source, balance)| BalanceReport::new(Some(source.as_str()), balance))
                .collect();
            write_json(&mut out, &reports)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> Result<(), CliError> {
    RateBounds::new(args.min_rate, args.max_rate).map_err(BalanceError::from)?;

    let config = TradeGenConfig {
        trade_count: args.trades,
        min_notional: args.min_notional,
        max_notional: args.max_notional,
        min_rate: args.min_rate,
        max_rate: args.max_rate,
        seed: args.seed,
    };
    let set = generate_random_trades(&config).map_err(BalanceError::from)?;

    match args.output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            write_trades(file, &set)?;
            eprintln!("Generated {} trades → {}", set.len(), path.display());
        }
        None => write_trades(io::stdout().lock(), &set)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        level_filter(cli.log_level)
    };
    env_logger::builder().filter_level(level).init();

    let result = match cli.command {
        Command::Balance(args) => cmd_balance(args),
        Command::Generate(args) => cmd_generate(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
