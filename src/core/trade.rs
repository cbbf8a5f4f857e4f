use crate::core::error::ValidationError;
use crate::core::rounding;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An interest rate swap trade already on the book.
///
/// Only the notional and the rate matter for balancing; the trade's
/// cashflow is derived from them. Trades are immutable once created.
///
/// # Examples
///
/// ```
/// use swap_balancer::core::trade::ExistingTrade;
/// use rust_decimal_macros::dec;
///
/// let trade = ExistingTrade::new(dec!(300000), dec!(0.05));
/// assert_eq!(trade.cashflow(), Some(dec!(15000.00)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingTrade {
    /// Signed principal; the sign gives the direction.
    notional: Decimal,
    /// Rate applied to the notional.
    rate: Decimal,
}

impl ExistingTrade {
    pub fn new(notional: Decimal, rate: Decimal) -> Self {
        Self { notional, rate }
    }

    /// Build a trade from floating point values, rejecting NaN and infinities.
    ///
    /// `row` is the 1-based position of the trade, used in error messages.
    pub fn try_from_f64(row: usize, notional: f64, rate: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            notional: finite_decimal(row, "notional", notional)?,
            rate: finite_decimal(row, "rate", rate)?,
        })
    }

    pub fn notional(&self) -> Decimal {
        self.notional
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// `notional * rate` rounded to cents, `None` on overflow.
    pub fn cashflow(&self) -> Option<Decimal> {
        rounding::cashflow(self.notional, self.rate)
    }
}

fn finite_decimal(row: usize, field: &'static str, value: f64) -> Result<Decimal, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            row,
            field,
            value: value.to_string(),
        });
    }
    Decimal::try_from(value).map_err(|_| ValidationError::InvalidNumber {
        row,
        field,
        value: value.to_string(),
    })
}

/// A trade produced by the balancer.
///
/// Notional and cashflow carry at most two decimal places, the rate at
/// most eight. The cashflow is computed from the rounded notional and rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTrade {
    /// 1-based position after the existing trades.
    pub sequence_number: usize,
    pub notional: Decimal,
    pub rate: Decimal,
    pub cashflow: Decimal,
}

impl GeneratedTrade {
    /// Round `notional` and `rate` and derive the cashflow from the rounded values.
    ///
    /// Returns `None` if the cashflow overflows the decimal range.
    pub fn new(sequence_number: usize, notional: Decimal, rate: Decimal) -> Option<Self> {
        let notional = rounding::round_amount(notional);
        let rate = rounding::round_rate(rate);
        let cashflow = rounding::cashflow(notional, rate)?;
        Some(Self {
            sequence_number,
            notional,
            rate,
            cashflow,
        })
    }

    /// View this trade as an existing one, e.g. to re-balance a book that includes it.
    pub fn as_existing(&self) -> ExistingTrade {
        ExistingTrade::new(self.notional, self.rate)
    }
}

impl fmt::Display for GeneratedTrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade {}   {:15.2}  {:11.8}  {:15.2}",
            self.sequence_number, self.notional, self.rate, self.cashflow
        )
    }
}

/// An ordered collection of existing trades, typically one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSet {
    trades: Vec<ExistingTrade>,
}

impl TradeSet {
    pub fn new() -> Self {
        Self { trades: Vec::new() }
    }

    pub fn add(&mut self, trade: ExistingTrade) {
        self.trades.push(trade);
    }

    /// Append generated trades so the set can be balanced again.
    pub fn extend_generated<'a>(&mut self, generated: impl IntoIterator<Item = &'a GeneratedTrade>) {
        self.trades
            .extend(generated.into_iter().map(GeneratedTrade::as_existing));
    }

    pub fn trades(&self) -> &[ExistingTrade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Unrounded sum of all notionals.
    pub fn notional_total(&self) -> Decimal {
        self.trades.iter().map(|t| t.notional()).sum()
    }
}

impl FromIterator<ExistingTrade> for TradeSet {
    fn from_iter<T: IntoIterator<Item = ExistingTrade>>(iter: T) -> Self {
        Self {
            trades: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_existing_trade_cashflow() {
        let trade = ExistingTrade::new(dec!(-12073.4), dec!(0.00146435));
        assert_eq!(trade.cashflow(), Some(dec!(-17.68)));
    }

    #[test]
    fn test_try_from_f64_rejects_nan() {
        let err = ExistingTrade::try_from_f64(3, f64::NAN, 0.05).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonFinite { row: 3, field: "notional", .. }
        ));

        let err = ExistingTrade::try_from_f64(1, 100.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "rate", .. }));
    }

    #[test]
    fn test_try_from_f64() {
        let trade = ExistingTrade::try_from_f64(1, 1000.5, -0.25).unwrap();
        assert_eq!(trade.notional(), dec!(1000.5));
        assert_eq!(trade.rate(), dec!(-0.25));
    }

    #[test]
    fn test_generated_trade_rounding() {
        let trade = GeneratedTrade::new(3, dec!(-26409.6000001), dec!(0.1)).unwrap();
        assert_eq!(trade.notional, dec!(-26409.60));
        assert_eq!(trade.cashflow, dec!(-2640.96));
        assert!(trade.notional.scale() <= 2);
    }

    #[test]
    fn test_generated_trade_display() {
        let trade = GeneratedTrade::new(4, dec!(26483), dec!(0.08)).unwrap();
        assert_eq!(
            trade.to_string(),
            "Trade 4          26483.00   0.08000000          2118.64"
        );
    }

    #[test]
    fn test_trade_set_extend_generated() {
        let mut set: TradeSet = vec![ExistingTrade::new(dec!(100), dec!(0.05))]
            .into_iter()
            .collect();
        let generated = GeneratedTrade::new(2, dec!(-100), dec!(0.05)).unwrap();
        set.extend_generated([&generated]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.notional_total(), Decimal::ZERO);
    }
}
