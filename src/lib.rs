//! # swap-balancer
//!
//! Brings a book of interest rate swap trades to zero-sum notional and
//! cashflow by generating one or two offsetting trades.
//!
//! If a single trade of notional `-Σ notional` at rate
//! `Σ cashflow / Σ notional` fits within the allowed rate bounds, that trade
//! is returned. Otherwise two trades at caller-chosen rates are solved for
//! in closed form.
//!
//! ## Architecture
//!
//! - **core** — Trades, running totals, rounding rules, errors
//! - **balancing** — Validated configuration, the balancer, zero-sum verification
//! - **io** — CSV input, text/JSON reports, CSV output
//! - **simulation** — Random trade books for testing and benchmarks

pub mod balancing;
pub mod core;
pub mod io;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::balancing::balancer::{Balance, Balancer, Resolution};
    pub use crate::balancing::config::{BalancerConfig, CandidateRates, RateBounds};
    pub use crate::balancing::verification::Verification;
    pub use crate::core::aggregate::Aggregate;
    pub use crate::core::error::{BalanceError, ConfigurationError, ValidationError};
    pub use crate::core::trade::{ExistingTrade, GeneratedTrade, TradeSet};
}
