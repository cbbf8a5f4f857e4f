pub mod aggregate;
pub mod error;
pub mod rounding;
pub mod trade;
