//! Premium cash-flow schedules derived from year records

use log::debug;
use serde::{Deserialize, Serialize};

use super::irr::solve_irr;
use crate::policy::YearRecord;

/// Cumulative premiums and terminal value for one (product, holding year) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    /// Index i holds the cumulative premium paid through policy year i + 1
    pub yearly_premiums: Vec<f64>,

    /// Total value at the end of the holding period
    pub terminal_value: f64,

    /// Number of years held; equals `yearly_premiums.len()`
    pub holding_years: u32,
}

impl CashFlowSchedule {
    /// Build the schedule for holding a product `holding_years` years.
    ///
    /// The terminal value is the total of the record at `holding_years`,
    /// or 0 when the table has no such year (the IRR is then not computable).
    pub fn from_records(records: &[YearRecord], holding_years: u32, annual_premium: f64) -> Self {
        let terminal_value = records
            .iter()
            .find(|r| r.policy_year == holding_years)
            .map(|r| r.total)
            .unwrap_or(0.0);

        Self {
            yearly_premiums: yearly_premiums(records, holding_years, annual_premium),
            terminal_value,
            holding_years,
        }
    }

    /// Internal rate of return of this schedule, as a percentage
    pub fn irr(&self) -> Option<f64> {
        solve_irr(&self.yearly_premiums, self.terminal_value, self.holding_years)
    }
}

/// Cumulative premiums paid through each year `1..=holding_years`.
///
/// Tables are often sparse. A year without a record falls back to
/// `annual_premium * year`, i.e. a flat premium paid every year. This is an
/// estimate, not an error.
pub fn yearly_premiums(records: &[YearRecord], holding_years: u32, annual_premium: f64) -> Vec<f64> {
    let mut premiums = Vec::with_capacity(holding_years as usize);
    let mut estimated = Vec::new();

    for year in 1..=holding_years {
        match records.iter().find(|r| r.policy_year == year) {
            Some(record) => premiums.push(record.premiums_paid),
            None => {
                premiums.push(annual_premium * year as f64);
                estimated.push(year);
            }
        }
    }

    if !estimated.is_empty() {
        debug!(
            "holding {} years: {} year(s) estimated from flat premium, first {:?}",
            holding_years,
            estimated.len(),
            &estimated[..estimated.len().min(10)]
        );
    }

    premiums
}
