use crate::core::aggregate::Aggregate;
use crate::core::rounding::ZERO_SUM_TOLERANCE;
use crate::core::trade::GeneratedTrade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals of the book after the generated trades are appended.
///
/// This is a diagnostic and the balancer returns its trades whether or not
/// the check passes. The notional total is always zero. The cashflow total
/// is within [`ZERO_SUM_TOLERANCE`] for two generated trades, but a single
/// trade carries its rate at eight decimals, so its residual is bounded only
/// by `0.01 + |notional_sum| * 5e-9`. Books above roughly two million of net
/// notional can therefore fail [`is_zero_sum`](Self::is_zero_sum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub notional_total: Decimal,
    pub cashflow_total: Decimal,
}

impl Verification {
    pub fn of(aggregate: &Aggregate, generated: &[GeneratedTrade]) -> Self {
        let mut notional_total = aggregate.notional_sum();
        let mut cashflow_total = aggregate.cashflow_sum();
        for trade in generated {
            notional_total += trade.notional;
            cashflow_total += trade.cashflow;
        }
        Self {
            notional_total,
            cashflow_total,
        }
    }

    /// Both totals are within the tolerance of zero.
    pub fn is_zero_sum(&self) -> bool {
        self.notional_total.abs() <= ZERO_SUM_TOLERANCE
            && self.cashflow_total.abs() <= ZERO_SUM_TOLERANCE
    }
}
