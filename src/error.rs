//! Error types for loading tables and building comparisons
//!
//! The numeric core never fails: degenerate inputs come back as `None`.
//! These errors cover everything around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReturnsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid year record: {0}")]
    InvalidRecord(String),

    #[error("annual premium {amount} is below the minimum of {minimum}")]
    PremiumBelowMinimum { amount: f64, minimum: f64 },

    #[error("no products selected for comparison")]
    NoProducts,

    #[error("products without standard data: {}", .0.join(", "))]
    MissingStandardData(Vec<String>),

    #[error("none of the requested years exist in the product tables")]
    NoMatchingYears,
}

pub type Result<T> = std::result::Result<T, ReturnsError>;
