use proptest::prelude::*;
use rust_decimal::Decimal;
use swap_balancer::balancing::balancer::{Balancer, Resolution};
use swap_balancer::balancing::config::BalancerConfig;
use swap_balancer::core::aggregate::Aggregate;
use swap_balancer::core::rounding::ZERO_SUM_TOLERANCE;
use swap_balancer::core::trade::{ExistingTrade, TradeSet};

/// Notional in cents, up to ±25,000.00.
fn arb_notional() -> impl Strategy<Value = Decimal> {
    (-2_500_000i64..=2_500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rate with eight decimals in [-0.1, 0.1].
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..=10_000_000i64).prop_map(|units| Decimal::new(units, 8))
}

/// Occasionally far outside the default bounds, to force the two-trade path.
fn arb_wide_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        3 => arb_rate(),
        1 => (-100_000_000i64..=100_000_000i64).prop_map(|units| Decimal::new(units, 8)),
    ]
}

fn arb_trade() -> impl Strategy<Value = ExistingTrade> {
    (arb_notional(), arb_wide_rate()).prop_map(|(n, r)| ExistingTrade::new(n, r))
}

/// Notional in cents, up to ±1,000,000,000.00.
fn arb_large_notional() -> impl Strategy<Value = Decimal> {
    (-100_000_000_000i64..=100_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A book of 1..40 trades with notionals large enough that the
/// eight-decimal rate of a single offsetting trade leaves a visible residual.
fn arb_large_book() -> impl Strategy<Value = TradeSet> {
    prop::collection::vec(
        (arb_large_notional(), arb_wide_rate()).prop_map(|(n, r)| ExistingTrade::new(n, r)),
        1..40,
    )
    .prop_map(|trades| trades.into_iter().collect())
}

/// A book of 1..40 trades.
fn arb_book() -> impl Strategy<Value = TradeSet> {
    prop::collection::vec(arb_trade(), 1..40).prop_map(|trades| trades.into_iter().collect())
}

proptest! {
    // ===================================================================
    // INVARIANT 1: The book is zero-sum after the generated trades.
    //
    // Both totals end within the rounding tolerance of zero, whichever
    // path the balancer takes.
    // ===================================================================
    #[test]
    fn generated_trades_zero_the_book(book in arb_book()) {
        let balance = Balancer::default().balance(book.trades()).unwrap();
        prop_assert!(
            balance.verification.is_zero_sum(),
            "totals after balancing: {:?}",
            balance.verification
        );
    }

    // ===================================================================
    // INVARIANT 2: One trade exactly when the required rate is in bounds.
    //
    // Otherwise two trades, at the configured candidate rates.
    // ===================================================================
    #[test]
    fn trade_count_follows_required_rate(book in arb_book()) {
        let config = BalancerConfig::default();
        let balance = Balancer::new(config).balance(book.trades()).unwrap();
        let in_bounds = balance
            .required_rate
            .map(|rate| config.bounds().contains(rate))
            .unwrap_or(false);

        match balance.resolution {
            Resolution::SingleTrade => {
                prop_assert!(in_bounds);
                prop_assert_eq!(balance.trade_count(), 1);
                prop_assert_eq!(balance.trades[0].notional, -balance.aggregate.notional_sum());
            }
            Resolution::TwoTrades => {
                prop_assert!(!in_bounds);
                prop_assert_eq!(balance.trade_count(), 2);
                let (r1, r2) = config.candidate_rates();
                prop_assert_eq!(balance.trades[0].rate, r1);
                prop_assert_eq!(balance.trades[1].rate, r2);
            }
            Resolution::AlreadyBalanced => {
                prop_assert_eq!(balance.aggregate.notional_sum(), Decimal::ZERO);
                prop_assert_eq!(balance.aggregate.cashflow_sum(), Decimal::ZERO);
                prop_assert_eq!(balance.trade_count(), 1);
            }
        }
    }

    // ===================================================================
    // INVARIANT 3: Rounding law.
    //
    // Notionals and cashflows carry two decimals, rates eight, and each
    // cashflow is the rounded product of its rounded notional and rate.
    // ===================================================================
    #[test]
    fn generated_trades_are_rounded(book in arb_book()) {
        let balance = Balancer::default().balance(book.trades()).unwrap();
        for trade in &balance.trades {
            prop_assert_eq!(trade.notional.scale(), 2);
            prop_assert_eq!(trade.cashflow.scale(), 2);
            prop_assert_eq!(trade.rate.scale(), 8);
            prop_assert_eq!(trade.cashflow, (trade.notional * trade.rate).round_dp(2));
        }
    }

    // ===================================================================
    // INVARIANT 4: Sequence numbers continue after the existing trades.
    // ===================================================================
    #[test]
    fn sequence_numbers_continue(book in arb_book()) {
        let balance = Balancer::default().balance(book.trades()).unwrap();
        for (i, trade) in balance.trades.iter().enumerate() {
            prop_assert_eq!(trade.sequence_number, book.len() + 1 + i);
        }
    }

    // ===================================================================
    // INVARIANT 5: Re-balancing a balanced book needs only a tiny fix.
    //
    // With the generated trades appended, the notional sum is zero and the
    // cashflow residual is within tolerance, so any further correction is
    // bounded by residual / |r1 - r2|.
    // ===================================================================
    #[test]
    fn rebalancing_is_near_idempotent(book in arb_book()) {
        let balancer = Balancer::default();
        let first = balancer.balance(book.trades()).unwrap();

        let mut extended = book.clone();
        extended.extend_generated(&first.trades);
        let second = balancer.balance(extended.trades()).unwrap();

        prop_assert_eq!(second.aggregate.notional_sum(), Decimal::ZERO);
        prop_assert!(second.aggregate.cashflow_sum().abs() <= ZERO_SUM_TOLERANCE);

        let (r1, r2) = balancer.config().candidate_rates();
        let bound = ZERO_SUM_TOLERANCE / (r1 - r2).abs() + ZERO_SUM_TOLERANCE;
        for trade in &second.trades {
            prop_assert!(trade.notional.abs() <= bound, "correction {} too large", trade.notional);
        }
        if second.aggregate.cashflow_sum().is_zero() {
            prop_assert_eq!(second.resolution, Resolution::AlreadyBalanced);
        }
    }

    // ===================================================================
    // INVARIANT 6: Streaming totals equal the in-memory totals,
    // independent of trade order.
    // ===================================================================
    #[test]
    fn aggregate_is_order_independent(book in arb_book()) {
        let forward = Aggregate::from_trades(book.trades()).unwrap();
        let reversed = Aggregate::from_trades(book.trades().iter().rev()).unwrap();
        prop_assert_eq!(forward, reversed);
        prop_assert_eq!(forward.count(), book.len());
    }

    // ===================================================================
    // INVARIANT 7: Residual bound for large books.
    //
    // The single trade's rate is rounded to eight decimals, so its cashflow
    // can miss by up to |N| * 5e-9 before rounding to cents. The notional
    // total stays exactly zero on every path.
    // ===================================================================
    #[test]
    fn residual_scales_with_notional(book in arb_large_book()) {
        let balance = Balancer::default().balance(book.trades()).unwrap();
        let notional_sum = balance.aggregate.notional_sum();
        let bound = ZERO_SUM_TOLERANCE + notional_sum.abs() * Decimal::new(5, 9);

        prop_assert_eq!(balance.verification.notional_total, Decimal::ZERO);
        prop_assert!(
            balance.verification.cashflow_total.abs() <= bound,
            "cashflow residual {} exceeds {}",
            balance.verification.cashflow_total,
            bound
        );
        if balance.resolution == Resolution::TwoTrades {
            prop_assert!(balance.verification.is_zero_sum());
        }
    }
}
