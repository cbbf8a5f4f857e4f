//! Random trade books for exercising the balancer.
//!
//! Notionals are drawn uniformly in magnitude with a random sign, rates
//! uniformly within the configured bounds.

use crate::core::error::ValidationError;
use crate::core::rounding;
use crate::core::trade::{ExistingTrade, TradeSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Configuration for generating a random trade book.
#[derive(Debug, Clone)]
pub struct TradeGenConfig {
    /// Number of trades to generate.
    pub trade_count: usize,
    /// Smallest absolute notional.
    pub min_notional: Decimal,
    /// Largest absolute notional.
    pub max_notional: Decimal,
    pub min_rate: Decimal,
    pub max_rate: Decimal,
    /// Fixed seed for reproducible books; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for TradeGenConfig {
    fn default() -> Self {
        Self {
            trade_count: 100,
            min_notional: Decimal::from(1_000),
            max_notional: Decimal::from(1_000_000),
            min_rate: Decimal::new(-1, 1),
            max_rate: Decimal::new(1, 1),
            seed: None,
        }
    }
}

/// Generate a random trade book.
///
/// Notionals carry two decimal places and rates eight, like real tickets.
pub fn generate_random_trades(config: &TradeGenConfig) -> Result<TradeSet, ValidationError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let min_notional = config.min_notional.abs().to_f64().unwrap_or(1_000.0);
    let max_notional = config.max_notional.abs().to_f64().unwrap_or(1_000_000.0);
    let min_rate = config.min_rate.to_f64().unwrap_or(-0.1);
    let max_rate = config.max_rate.to_f64().unwrap_or(0.1);

    (1..=config.trade_count)
        .map(|row| -> Result<ExistingTrade, ValidationError> {
            let magnitude = uniform(&mut rng, min_notional, max_notional);
            let notional = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            let rate = uniform(&mut rng, min_rate, max_rate);
            let trade = ExistingTrade::try_from_f64(row, notional, rate)?;
            Ok(ExistingTrade::new(
                rounding::round_amount(trade.notional()),
                rounding::round_rate(trade.rate()),
            ))
        })
        .collect()
}

fn uniform(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    if low < high {
        rng.gen_range(low..=high)
    } else {
        low
    }
}
