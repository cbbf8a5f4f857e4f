use crate::balancing::balancer::{Balance, Resolution};
use crate::core::trade::GeneratedTrade;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};

/// Output format of the `balance` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One fixed-width row per generated trade
    #[default]
    Text,
    /// Full report as pretty-printed JSON
    Json,
}

/// Fixed-width rows, one per trade, no header:
/// `Trade <n>   <notional>  <rate>  <cashflow>`.
pub fn format_trades(trades: &[GeneratedTrade]) -> String {
    trades
        .iter()
        .map(GeneratedTrade::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the text rows of a balance, newline terminated.
pub fn write_text<W: Write>(mut out: W, balance: &Balance) -> io::Result<()> {
    for trade in &balance.trades {
        writeln!(out, "{trade}")?;
    }
    Ok(())
}

/// JSON form of a balance. Decimals are emitted as strings.
#[derive(Debug, Serialize)]
pub struct BalanceReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    pub trade_count: usize,
    pub notional_sum: Decimal,
    pub cashflow_sum: Decimal,
    pub required_rate: Option<Decimal>,
    pub resolution: Resolution,
    pub trades: &'a [GeneratedTrade],
    pub verification: VerificationReport,
}

#[derive(Debug, Serialize)]
pub struct VerificationReport {
    pub notional_total: Decimal,
    pub cashflow_total: Decimal,
    pub zero_sum: bool,
}

impl<'a> BalanceReport<'a> {
    pub fn new(source: Option<&'a str>, balance: &'a Balance) -> Self {
        Self {
            source,
            trade_count: balance.aggregate.count(),
            notional_sum: balance.aggregate.notional_sum(),
            cashflow_sum: balance.aggregate.cashflow_sum(),
            required_rate: balance.required_rate,
            resolution: balance.resolution,
            trades: &balance.trades,
            verification: VerificationReport {
                notional_total: balance.verification.notional_total,
                cashflow_total: balance.verification.cashflow_total,
                zero_sum: balance.verification.is_zero_sum(),
            },
        }
    }
}

/// Write several reports as one pretty-printed JSON array.
pub fn write_json<W: Write>(out: W, reports: &[BalanceReport<'_>]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, reports)
}
