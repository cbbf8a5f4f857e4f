use crate::balancing::config::BalancerConfig;
use crate::balancing::verification::Verification;
use crate::core::aggregate::Aggregate;
use crate::core::error::{BalanceError, ValidationError};
use crate::core::trade::{ExistingTrade, GeneratedTrade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the book was brought to zero-sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Both totals were already zero; a single empty trade is emitted.
    AlreadyBalanced,
    /// One offsetting trade at the required rate.
    SingleTrade,
    /// The required rate is outside the bounds (or undefined); two trades
    /// at the candidate rates.
    TwoTrades,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::AlreadyBalanced => write!(f, "already balanced"),
            Resolution::SingleTrade => write!(f, "1 trade"),
            Resolution::TwoTrades => write!(f, "2 trades"),
        }
    }
}

/// Outcome of balancing one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Totals of the existing trades.
    pub aggregate: Aggregate,
    /// Rate a single offsetting trade would need, if defined.
    pub required_rate: Option<Decimal>,
    pub resolution: Resolution,
    /// One or two trades, in creation order.
    pub trades: Vec<GeneratedTrade>,
    /// Totals including the generated trades.
    pub verification: Verification,
}

impl Balance {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}

/// Generates the trades that bring a book to zero notional and zero cashflow.
///
/// # Algorithm
///
/// 1. Sum notionals and (rounded) cashflows of the existing trades.
/// 2. One trade of notional `-notional_sum` zeroes the notional; it zeroes
///    the cashflow too at rate `cashflow_sum / notional_sum`. If that rate
///    is within the bounds (inclusive), one trade suffices.
/// 3. Otherwise solve for two trades at the candidate rates `r1`, `r2`:
///
///    ```text
///    notional_sum + N1 + N2 = 0
///    cashflow_sum + N1 * r1 + N2 * r2 = 0
///    => N1 = (notional_sum * r2 - cashflow_sum) / (r1 - r2)
///       N2 = -notional_sum - N1
///    ```
///
/// A zero notional sum leaves the single-trade rate undefined. If the
/// cashflow sum is zero as well the book is already balanced and one empty
/// trade is returned; otherwise the two-trade solution applies.
///
/// The balancer holds no state between calls.
///
/// # Examples
///
/// ```
/// use swap_balancer::balancing::balancer::Balancer;
/// use swap_balancer::balancing::config::BalancerConfig;
/// use swap_balancer::core::trade::ExistingTrade;
/// use rust_decimal_macros::dec;
///
/// let balancer = Balancer::new(BalancerConfig::default());
/// let balance = balancer
///     .balance(&[ExistingTrade::new(dec!(1000), dec!(0.05))])
///     .unwrap();
///
/// assert_eq!(balance.trade_count(), 1);
/// assert_eq!(balance.trades[0].notional, dec!(-1000));
/// assert_eq!(balance.trades[0].rate, dec!(0.05));
/// assert!(balance.verification.is_zero_sum());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balancer {
    config: BalancerConfig,
}

impl Balancer {
    pub fn new(config: BalancerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Balance a book held in memory.
    pub fn balance(&self, trades: &[ExistingTrade]) -> Result<Balance, BalanceError> {
        let aggregate = Aggregate::from_trades(trades)?;
        self.balance_aggregate(&aggregate)
    }

    /// Balance a book from its totals, e.g. after streaming it from disk.
    pub fn balance_aggregate(&self, aggregate: &Aggregate) -> Result<Balance, BalanceError> {
        if aggregate.is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }

        let notional_sum = aggregate.notional_sum();
        let cashflow_sum = aggregate.cashflow_sum();
        let bounds = self.config.bounds();
        let next = aggregate.count() + 1;

        let (required_rate, resolution, trades) = match aggregate.required_rate() {
            Some(rate) if bounds.contains(rate) => (
                Some(rate),
                Resolution::SingleTrade,
                vec![generate(next, -notional_sum, rate)?],
            ),
            None if cashflow_sum.is_zero() => {
                // any rate keeps a zero notional at zero cashflow
                let rate = bounds.clamp(Decimal::ZERO);
                (
                    Some(rate),
                    Resolution::AlreadyBalanced,
                    vec![generate(next, Decimal::ZERO, rate)?],
                )
            }
            required_rate => (
                required_rate,
                Resolution::TwoTrades,
                self.solve_two_trades(next, notional_sum, cashflow_sum)?,
            ),
        };

        let verification = Verification::of(aggregate, &trades);
        Ok(Balance {
            aggregate: *aggregate,
            required_rate,
            resolution,
            trades,
            verification,
        })
    }

    fn solve_two_trades(
        &self,
        next: usize,
        notional_sum: Decimal,
        cashflow_sum: Decimal,
    ) -> Result<Vec<GeneratedTrade>, ValidationError> {
        let (r1, r2) = self.config.candidate_rates();
        let overflow = ValidationError::Overflow {
            context: "solving for two trades",
        };

        // r1 != r2 is guaranteed by BalancerConfig
        let n1 = notional_sum
            .checked_mul(r2)
            .and_then(|v| v.checked_sub(cashflow_sum))
            .and_then(|v| v.checked_div(r1.checked_sub(r2)?))
            .ok_or(overflow.clone())?;
        let first = generate(next, n1, r1)?;

        let n2 = (-notional_sum).checked_sub(first.notional).ok_or(overflow)?;
        let second = generate(next + 1, n2, r2)?;

        Ok(vec![first, second])
    }
}

fn generate(
    sequence_number: usize,
    notional: Decimal,
    rate: Decimal,
) -> Result<GeneratedTrade, ValidationError> {
    GeneratedTrade::new(sequence_number, notional, rate).ok_or(ValidationError::Overflow {
        context: "computing a generated trade cashflow",
    })
}
