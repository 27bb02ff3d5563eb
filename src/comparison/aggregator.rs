//! Per-year ranking of products in a comparison table

use serde::{Deserialize, Serialize};

use crate::policy::YearRecord;
use crate::returns::ReturnMetrics;

/// One product's figures at one target year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCell {
    pub product_id: u32,
    pub product_name: String,
    /// Scaled record at this year, if the product reports one
    pub record: Option<YearRecord>,
    pub metrics: ReturnMetrics,
    /// Highest total value at this year (ties all flagged)
    pub is_best_total: bool,
}

impl ProductCell {
    pub fn total(&self) -> Option<f64> {
        self.record.map(|r| r.total)
    }
}

/// One target year across all compared products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub policy_year: u32,
    /// Cumulative premium paid by this year
    pub premiums_paid: f64,
    /// Customer's age at this policy year, when the customer age is known
    pub attained_age: Option<u32>,
    pub cells: Vec<ProductCell>,
}

/// Flag the products with the highest total at one year.
///
/// Every product whose total is positive and exactly equal to the maximum is
/// flagged, so tied products are all highlighted. A missing total counts as 0.
pub fn best_total_flags(totals: &[Option<f64>]) -> Vec<bool> {
    let max_total = totals
        .iter()
        .map(|t| t.unwrap_or(0.0))
        .fold(0.0_f64, |max, t| if t > max { t } else { max });

    totals
        .iter()
        .map(|t| {
            let total = t.unwrap_or(0.0);
            total > 0.0 && total == max_total
        })
        .collect()
}

/// Set `is_best_total` on each cell of a row
pub fn flag_best_totals(cells: &mut [ProductCell]) {
    let totals: Vec<Option<f64>> = cells.iter().map(ProductCell::total).collect();
    for (cell, best) in cells.iter_mut().zip(best_total_flags(&totals)) {
        cell.is_best_total = best;
    }
}
