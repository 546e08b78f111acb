//! Error types for the ingestion and filter-selection boundaries.
//!
//! The aggregation core itself never fails: empty selections produce empty
//! results.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a sales export into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or its header could not be read.
    #[error("failed to open sales data {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record did not match the expected columns or types.
    #[error("malformed sales record at line {line}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while turning dropdown selections into filter criteria.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid month '{0}': expected a number or 'Todos'")]
    InvalidMonth(String),

    #[error("month {0} is out of range (1-12)")]
    MonthOutOfRange(u32),

    #[error("invalid year '{0}': expected a number or 'Todos'")]
    InvalidYear(String),
}
