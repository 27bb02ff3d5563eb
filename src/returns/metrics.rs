//! Per-cell return metrics for one product held for a given number of years

use serde::{Deserialize, Serialize};

use super::breakeven::break_even_year;
use super::schedule::CashFlowSchedule;
use super::simple::simple_annualized_return;
use crate::policy::YearRecord;

/// Return figures for one (product, holding year) pair; None renders as a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Annualized simple return, percent
    pub simple_annualized_return: Option<f64>,

    /// Multi-payment internal rate of return, percent
    pub irr: Option<f64>,

    /// First year (not after the holding year) where value covers premiums paid
    pub break_even_year: Option<u32>,
}

/// Compute all return metrics for holding a product `holding_years` years.
///
/// `records` are the product's year records in policy-year order.
/// `annual_premium` backs up years where the table has no premium figure.
pub fn compute_return_metrics(
    records: &[YearRecord],
    holding_years: u32,
    annual_premium: f64,
) -> ReturnMetrics {
    if holding_years == 0 {
        return ReturnMetrics::default();
    }

    let record = records.iter().find(|r| r.policy_year == holding_years);
    let terminal_value = record.map(|r| r.total).unwrap_or(0.0);
    let premiums_paid = record
        .map(|r| r.premiums_paid)
        .unwrap_or(annual_premium * holding_years as f64);

    let simple = simple_annualized_return(terminal_value, premiums_paid, holding_years);

    let irr = if terminal_value > 0.0 && premiums_paid > 0.0 {
        CashFlowSchedule::from_records(records, holding_years, annual_premium).irr()
    } else {
        None
    };

    let held: Vec<YearRecord> = records
        .iter()
        .filter(|r| r.policy_year <= holding_years)
        .copied()
        .collect();

    ReturnMetrics {
        simple_annualized_return: simple,
        irr,
        break_even_year: break_even_year(&held),
    }
}
