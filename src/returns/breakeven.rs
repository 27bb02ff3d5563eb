//! Break-even and return milestone lookups

use serde::{Deserialize, Serialize};

use crate::policy::YearRecord;

/// Multiples of the total investment tracked as milestones
pub const MILESTONE_MULTIPLIERS: [f64; 6] = [1.0, 1.5, 2.0, 3.0, 4.0, 5.0];

/// First policy year whose total value covers the premiums paid so far.
///
/// Records are scanned in the order given; no interpolation between years.
pub fn break_even_year(records: &[YearRecord]) -> Option<u32> {
    records
        .iter()
        .find(|r| r.has_broken_even())
        .map(|r| r.policy_year)
}

/// First record whose total value reaches `target`
pub fn first_year_reaching(records: &[YearRecord], target: f64) -> Option<&YearRecord> {
    records.iter().find(|r| r.total >= target)
}

/// When the total value first reaches a multiple of the investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnMilestone {
    pub multiplier: f64,
    pub target_amount: f64,
    pub reached_year: Option<u32>,
    pub value_at_reached: Option<f64>,
}

/// Milestones for each of [`MILESTONE_MULTIPLIERS`]
pub fn return_milestones(records: &[YearRecord], total_investment: f64) -> Vec<ReturnMilestone> {
    MILESTONE_MULTIPLIERS
        .iter()
        .map(|&multiplier| {
            let target_amount = total_investment * multiplier;
            let reached = first_year_reaching(records, target_amount);
            ReturnMilestone {
                multiplier,
                target_amount,
                reached_year: reached.map(|r| r.policy_year),
                value_at_reached: reached.map(|r| r.total),
            }
        })
        .collect()
}
