//! Rounding rules shared by every generated trade.
//!
//! Notionals and cashflows settle in cents, rates are quoted to eight
//! decimal places. Midpoints round to even, rounded values always carry
//! exactly that many decimal places, and a value that rounds to zero is
//! reported as positive zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places kept on notionals and cashflows.
pub const AMOUNT_DP: u32 = 2;

/// Decimal places kept on rates.
pub const RATE_DP: u32 = 8;

/// Largest absolute residual on either total that still counts as zero-sum.
pub const ZERO_SUM_TOLERANCE: Decimal = dec!(0.01);

/// Round a notional or cashflow to cents.
pub fn round_amount(value: Decimal) -> Decimal {
    round_to(value, AMOUNT_DP)
}

/// Round a rate to eight decimal places.
pub fn round_rate(value: Decimal) -> Decimal {
    round_to(value, RATE_DP)
}

/// Cashflow of a position: `notional * rate`, rounded to cents.
///
/// Returns `None` if the product overflows the decimal range.
pub fn cashflow(notional: Decimal, rate: Decimal) -> Option<Decimal> {
    notional.checked_mul(rate).map(round_amount)
}

fn round_to(value: Decimal, dp: u32) -> Decimal {
    let mut value = value.round_dp(dp);
    value.rescale(dp);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}
