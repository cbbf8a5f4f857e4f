//! Single-trade balancing example.
//!
//! A book whose required rate falls inside the allowed bounds is
//! closed out by one offsetting trade.

use rust_decimal_macros::dec;
use swap_balancer::balancing::balancer::Balancer;
use swap_balancer::core::trade::{ExistingTrade, TradeSet};
use swap_balancer::io::report::format_trades;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  swap-balancer: Single Trade Example     ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut book = TradeSet::new();
    book.add(ExistingTrade::new(dec!(300_000), dec!(0.05)));
    book.add(ExistingTrade::new(dec!(245_891.29), dec!(0.04754239)));

    println!("Existing trades:");
    for (i, trade) in book.trades().iter().enumerate() {
        println!(
            "  #{:<3} notional {:>12}  rate {:>10}",
            i + 1,
            trade.notional(),
            trade.rate()
        );
    }
    println!();

    let balance = match Balancer::default().balance(book.trades()) {
        Ok(balance) => balance,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!("Notional sum:   {}", balance.aggregate.notional_sum());
    println!("Cashflow sum:   {}", balance.aggregate.cashflow_sum());
    if let Some(rate) = balance.required_rate {
        println!("Required rate:  {:.8}", rate);
    }
    println!("Resolution:     {}\n", balance.resolution);

    println!("━━━ Generated ━━━\n");
    println!("{}\n", format_trades(&balance.trades));

    println!(
        "After balancing: notional {}  cashflow {}  [{}]",
        balance.verification.notional_total,
        balance.verification.cashflow_total,
        if balance.verification.is_zero_sum() { "ZERO-SUM" } else { "OPEN" }
    );
}
