//! Policy Returns - return calculations for insurance illustration tables
//!
//! This library provides:
//! - Loading surrender value tables (guaranteed / non-guaranteed / total / premiums paid)
//! - Internal rate of return over the actual premium schedule (Newton-Raphson)
//! - Simple annualized return, CAGR, break-even year and return milestones
//! - Multi-company comparison tables rescaled to a customer's premium

pub mod comparison;
pub mod config;
pub mod error;
pub mod policy;
pub mod returns;

// Re-export commonly used types
pub use comparison::{ComparisonEngine, ComparisonRow, ComparisonTable};
pub use config::ComparisonConfig;
pub use error::{Result, ReturnsError};
pub use policy::{ProductTable, YearRecord};
pub use returns::{compute_return_metrics, solve_irr, CashFlowSchedule, ReturnMetrics};
