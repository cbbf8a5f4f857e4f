//! File input and report output around the balancer.

pub mod reader;
pub mod report;
pub mod writer;

use crate::core::error::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file into trades.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}
