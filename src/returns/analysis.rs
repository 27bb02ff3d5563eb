//! Return analysis of a single plan document

use serde::{Deserialize, Serialize};

use super::breakeven::{break_even_year, return_milestones, ReturnMilestone};
use super::simple::{
    actual_investment, compound_annual_growth_rate, return_multiple, simple_annualized_return,
};
use crate::policy::YearRecord;

/// Policy years reported as stage returns, when present in the table
pub const STAGE_YEARS: [u32; 8] = [5, 10, 20, 30, 40, 50, 60, 70];

/// Premium terms of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanTerms {
    pub annual_premium: f64,
    /// Number of years premiums are paid
    pub payment_years: u32,
}

impl PlanTerms {
    pub fn total_investment(&self) -> f64 {
        self.annual_premium * self.payment_years as f64
    }

    /// Premium paid by the end of `holding_years`
    pub fn invested_by(&self, holding_years: u32) -> f64 {
        actual_investment(self.annual_premium, holding_years, self.payment_years)
    }
}

/// Simple return and CAGR at one policy year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageReturn {
    pub policy_year: u32,
    pub actual_investment: f64,
    pub value: f64,
    pub simple_annualized_return: Option<f64>,
    pub compound_annual_growth_rate: Option<f64>,
}

/// Summary of how a plan's value develops against its premiums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAnalysis {
    pub total_investment: f64,
    /// Total value in the last reported year
    pub final_value: Option<f64>,
    pub return_multiple: Option<f64>,
    pub total_gain: Option<f64>,
    pub break_even_year: Option<u32>,
    pub stages: Vec<StageReturn>,
    pub milestones: Vec<ReturnMilestone>,
}

impl PlanAnalysis {
    /// Analyze a plan's year records (in policy-year order) under its premium terms
    pub fn analyze(records: &[YearRecord], terms: PlanTerms) -> Self {
        let total_investment = terms.total_investment();
        let final_value = records.last().map(|r| r.total);

        let stages = STAGE_YEARS
            .iter()
            .filter_map(|&year| records.iter().find(|r| r.policy_year == year))
            .map(|r| {
                let invested = terms.invested_by(r.policy_year);
                StageReturn {
                    policy_year: r.policy_year,
                    actual_investment: invested,
                    value: r.total,
                    simple_annualized_return: simple_annualized_return(r.total, invested, r.policy_year),
                    compound_annual_growth_rate: compound_annual_growth_rate(
                        r.total,
                        invested,
                        r.policy_year,
                    ),
                }
            })
            .collect();

        Self {
            total_investment,
            final_value,
            return_multiple: final_value.and_then(|v| return_multiple(v, total_investment)),
            total_gain: final_value.map(|v| v - total_investment),
            break_even_year: break_even_year(records),
            stages,
            milestones: return_milestones(records, total_investment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn five_pay_plan() -> Vec<YearRecord> {
        let mut records: Vec<YearRecord> = (1..=5)
            .map(|y| YearRecord::new(y, 6_000.0 * y as f64, 0.0, 10_000.0 * y as f64))
            .collect();
        records.push(YearRecord::new(10, 40_000.0, 15_000.0, 50_000.0));
        records.push(YearRecord::new(20, 60_000.0, 50_000.0, 50_000.0));
        records
    }

    #[test]
    fn test_plan_summary() {
        let terms = PlanTerms {
            annual_premium: 10_000.0,
            payment_years: 5,
        };
        let analysis = PlanAnalysis::analyze(&five_pay_plan(), terms);

        assert_abs_diff_eq!(analysis.total_investment, 50_000.0);
        assert_eq!(analysis.final_value, Some(110_000.0));
        assert_abs_diff_eq!(analysis.return_multiple.unwrap(), 2.2);
        assert_abs_diff_eq!(analysis.total_gain.unwrap(), 60_000.0);
        assert_eq!(analysis.break_even_year, Some(10));
    }

    #[test]
    fn test_stage_returns_use_capped_investment() {
        let terms = PlanTerms {
            annual_premium: 10_000.0,
            payment_years: 5,
        };
        let analysis = PlanAnalysis::analyze(&five_pay_plan(), terms);

        let years: Vec<u32> = analysis.stages.iter().map(|s| s.policy_year).collect();
        assert_eq!(years, vec![5, 10, 20]);

        let year_20 = analysis.stages[2];
        assert_abs_diff_eq!(year_20.actual_investment, 50_000.0);
        // (110000 - 50000) / 50000 / 20
        assert_abs_diff_eq!(year_20.simple_annualized_return.unwrap(), 6.0, epsilon = 1e-12);
        // 2.2^(1/20) - 1
        assert_abs_diff_eq!(year_20.compound_annual_growth_rate.unwrap(), 4.0210, epsilon = 1e-4);
    }

    #[test]
    fn test_milestones_follow_total_investment() {
        let terms = PlanTerms {
            annual_premium: 10_000.0,
            payment_years: 5,
        };
        let analysis = PlanAnalysis::analyze(&five_pay_plan(), terms);

        assert_eq!(analysis.milestones[0].reached_year, Some(10));
        assert_eq!(analysis.milestones[2].reached_year, Some(20));
        assert_eq!(analysis.milestones[3].reached_year, None);
    }

    #[test]
    fn test_empty_plan() {
        let terms = PlanTerms {
            annual_premium: 10_000.0,
            payment_years: 0,
        };
        let analysis = PlanAnalysis::analyze(&[], terms);
        assert_eq!(analysis.final_value, None);
        assert_eq!(analysis.return_multiple, None);
        assert!(analysis.stages.is_empty());
    }
}
