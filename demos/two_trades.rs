//! Two-trade balancing example.
//!
//! When the rate a single trade would need lies outside the bounds, the
//! balancer splits the offset across two trades at fixed candidate rates.

use rust_decimal_macros::dec;
use swap_balancer::balancing::balancer::Balancer;
use swap_balancer::balancing::config::{BalancerConfig, CandidateRates, RateBounds};
use swap_balancer::core::error::BalanceError;
use swap_balancer::core::trade::{ExistingTrade, TradeSet};
use swap_balancer::io::report::format_trades;

fn main() -> Result<(), BalanceError> {
    println!("╔══════════════════════════════════════════╗");
    println!("║  swap-balancer: Two Trade Example        ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut book = TradeSet::new();
    book.add(ExistingTrade::new(dec!(12_000), dec!(0.045)));
    book.add(ExistingTrade::new(dec!(-12_073.4), dec!(0.00146435)));

    // --- Scenario 1: default bounds and rates ---
    println!("━━━ Scenario 1: Default Rates [0.1, 0.08] ━━━\n");

    let balance = Balancer::default().balance(book.trades())?;
    if let Some(rate) = balance.required_rate {
        println!("Required rate {:.4} is outside [-0.1, 0.1]\n", rate);
    }
    println!("{}\n", format_trades(&balance.trades));
    println!(
        "Totals: notional {}  cashflow {}\n",
        balance.verification.notional_total, balance.verification.cashflow_total
    );

    // --- Scenario 2: caller-chosen rates ---
    println!("━━━ Scenario 2: Explicit Rates [0.05, -0.02] ━━━\n");

    let config = BalancerConfig::new(
        RateBounds::default(),
        CandidateRates::Explicit(dec!(0.05), dec!(-0.02)),
    )?;
    let balance = Balancer::new(config).balance(book.trades())?;
    println!("{}\n", format_trades(&balance.trades));
    println!(
        "Totals: notional {}  cashflow {}",
        balance.verification.notional_total, balance.verification.cashflow_total
    );

    // --- Scenario 3: rebalancing is a no-op ---
    println!("\n━━━ Scenario 3: Rebalance ━━━\n");

    book.extend_generated(&balance.trades);
    let again = Balancer::new(config).balance(book.trades())?;
    println!("Resolution: {}", again.resolution);

    Ok(())
}
