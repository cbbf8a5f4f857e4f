use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input: empty or unreadable trade data, or inverted rate bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no trades found in input")]
    EmptyInput,
    #[error("non-finite {field} '{value}' in trade {row}")]
    NonFinite {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("invalid {field} '{value}' in trade {row}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("trade {row} has no {field} column")]
    MissingColumn { row: usize, field: &'static str },
    #[error("min_rate must be below max_rate, got [{min}, {max}]")]
    InvertedBounds { min: Decimal, max: Decimal },
    #[error("decimal overflow while {context}")]
    Overflow { context: &'static str },
    #[error("expecting a file with 'csv' extension, got '{0}'")]
    UnsupportedExtension(String),
}

/// Invalid candidate rates for the two-trade solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("expect different trade rates, got [{0}, {0}]")]
    IdenticalRates(Decimal),
    #[error("expect trade rate within [{min}, {max}], got {rate}")]
    RateOutOfBounds {
        rate: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("both trade rates must be supplied, got only one")]
    IncompleteRatePair,
}

/// Any failure of the balancer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}
