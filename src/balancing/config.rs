use crate::core::error::{BalanceError, ConfigurationError, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Inclusive interval of rates a generated trade may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBounds {
    min: Decimal,
    max: Decimal,
}

impl RateBounds {
    pub const DEFAULT_MIN: Decimal = dec!(-0.1);
    pub const DEFAULT_MAX: Decimal = dec!(0.1);

    /// Fails if `min >= max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, ValidationError> {
        if min >= max {
            return Err(ValidationError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn contains(&self, rate: Decimal) -> bool {
        self.min <= rate && rate <= self.max
    }

    pub fn clamp(&self, rate: Decimal) -> Decimal {
        rate.clamp(self.min, self.max)
    }
}

impl Default for RateBounds {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// The two rates used when a single offsetting trade is not enough.
///
/// Either chosen by the caller or derived from the bounds as
/// `[max, max - 0.1 * (max - min)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateRates {
    #[default]
    Derived,
    Explicit(Decimal, Decimal),
}

impl CandidateRates {
    /// Build from an optional caller-supplied pair. Supplying only one rate is an error.
    pub fn from_pair(
        first: Option<Decimal>,
        second: Option<Decimal>,
    ) -> Result<Self, ConfigurationError> {
        match (first, second) {
            (None, None) => Ok(Self::Derived),
            (Some(r1), Some(r2)) => Ok(Self::Explicit(r1, r2)),
            _ => Err(ConfigurationError::IncompleteRatePair),
        }
    }

    /// Resolve to concrete rates for the given bounds.
    pub fn resolve(&self, bounds: &RateBounds) -> Result<(Decimal, Decimal), ValidationError> {
        match *self {
            Self::Derived => bounds
                .max()
                .checked_sub(bounds.min())
                .and_then(|spread| spread.checked_mul(dec!(0.1)))
                .and_then(|step| bounds.max().checked_sub(step))
                .map(|r2| (bounds.max(), r2))
                .ok_or(ValidationError::Overflow {
                    context: "deriving candidate rates",
                }),
            Self::Explicit(r1, r2) => Ok((r1, r2)),
        }
    }
}

/// Validated parameters of a [`Balancer`](crate::balancing::balancer::Balancer).
///
/// # Examples
///
/// ```
/// use swap_balancer::balancing::config::{BalancerConfig, CandidateRates, RateBounds};
/// use rust_decimal_macros::dec;
///
/// let config = BalancerConfig::new(RateBounds::default(), CandidateRates::Derived).unwrap();
/// assert_eq!(config.candidate_rates(), (dec!(0.1), dec!(0.08)));
///
/// let bounds = RateBounds::default();
/// assert!(BalancerConfig::new(bounds, CandidateRates::Explicit(dec!(0.05), dec!(0.05))).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancerConfig {
    bounds: RateBounds,
    r1: Decimal,
    r2: Decimal,
}

impl BalancerConfig {
    /// Resolve and check the candidate rates: they must differ and lie within the bounds.
    pub fn new(bounds: RateBounds, candidates: CandidateRates) -> Result<Self, BalanceError> {
        let (r1, r2) = candidates.resolve(&bounds)?;
        if r1 == r2 {
            return Err(ConfigurationError::IdenticalRates(r1).into());
        }
        for rate in [r1, r2] {
            if !bounds.contains(rate) {
                return Err(ConfigurationError::RateOutOfBounds {
                    rate,
                    min: bounds.min(),
                    max: bounds.max(),
                }
                .into());
            }
        }
        Ok(Self { bounds, r1, r2 })
    }

    pub fn bounds(&self) -> &RateBounds {
        &self.bounds
    }

    /// Rates of the first and second trade of a two-trade solution.
    pub fn candidate_rates(&self) -> (Decimal, Decimal) {
        (self.r1, self.r2)
    }
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            bounds: RateBounds::default(),
            r1: dec!(0.1),
            r2: dec!(0.08),
        }
    }
}
