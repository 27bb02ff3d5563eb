//! Premium ratio used to rescale reference tables to the customer's premium

use crate::error::{Result, ReturnsError};
use crate::policy::ProductTable;

/// Smallest annual premium accepted for a comparison
pub const MIN_ANNUAL_PREMIUM: f64 = 2000.0;

/// Reference premium assumed when a table reports none
pub const DEFAULT_STANDARD_PREMIUM: f64 = 10000.0;

/// Annual premium the reference table was illustrated at
pub fn standard_annual_premium(reference: &ProductTable) -> f64 {
    match reference.standard_annual_premium() {
        Some(premium) if premium > 0.0 && premium.is_finite() => premium,
        _ => DEFAULT_STANDARD_PREMIUM,
    }
}

/// Ratio of the customer's annual premium to the reference table's premium.
///
/// Fails when the premium is below `min_annual_premium`.
pub fn premium_ratio(annual_premium: f64, min_annual_premium: f64, reference: &ProductTable) -> Result<f64> {
    if !annual_premium.is_finite() || annual_premium < min_annual_premium {
        return Err(ReturnsError::PremiumBelowMinimum {
            amount: annual_premium,
            minimum: min_annual_premium,
        });
    }
    Ok(annual_premium / standard_annual_premium(reference))
}
