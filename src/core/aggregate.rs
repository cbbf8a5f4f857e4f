use crate::core::error::ValidationError;
use crate::core::rounding;
use crate::core::trade::ExistingTrade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running totals over a book of trades.
///
/// Each trade's cashflow is rounded to cents before it is added, so
/// `cashflow_sum` is exactly what the book settles. Only the sums and the
/// trade count are kept, which lets a reader stream arbitrarily large
/// files through [`Aggregate::push`] in constant space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    notional_sum: Decimal,
    cashflow_sum: Decimal,
    count: usize,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum a sequence of trades in one pass.
    pub fn from_trades<'a>(
        trades: impl IntoIterator<Item = &'a ExistingTrade>,
    ) -> Result<Self, ValidationError> {
        let mut aggregate = Self::new();
        for trade in trades {
            aggregate.push(trade)?;
        }
        Ok(aggregate)
    }

    /// Add one trade to the totals.
    pub fn push(&mut self, trade: &ExistingTrade) -> Result<(), ValidationError> {
        let cashflow = trade.cashflow().ok_or(ValidationError::Overflow {
            context: "computing a trade cashflow",
        })?;
        self.notional_sum = self
            .notional_sum
            .checked_add(trade.notional())
            .ok_or(ValidationError::Overflow {
                context: "summing notionals",
            })?;
        self.cashflow_sum = self
            .cashflow_sum
            .checked_add(cashflow)
            .ok_or(ValidationError::Overflow {
                context: "summing cashflows",
            })?;
        self.count += 1;
        Ok(())
    }

    /// Total notional, rounded to cents.
    pub fn notional_sum(&self) -> Decimal {
        rounding::round_amount(self.notional_sum)
    }

    /// Total of the per-trade rounded cashflows.
    pub fn cashflow_sum(&self) -> Decimal {
        rounding::round_amount(self.cashflow_sum)
    }

    /// Number of trades summed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Rate of the single trade of notional `-notional_sum` that would also
    /// zero the cashflow: `cashflow_sum / notional_sum`.
    ///
    /// Undefined (`None`) when the notional sum is zero.
    pub fn required_rate(&self) -> Option<Decimal> {
        self.cashflow_sum().checked_div(self.notional_sum())
    }
}
