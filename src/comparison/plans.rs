//! Side-by-side comparison of uploaded plan documents
//!
//! Unlike the company comparison, plans keep their own premium terms and the
//! annual return shown next to the simple return is the CAGR of the premium
//! paid so far, not the multi-payment IRR.

use serde::{Deserialize, Serialize};

use crate::policy::{ProductTable, YearRecord};
use crate::returns::{compound_annual_growth_rate, simple_annualized_return, PlanTerms};

/// A plan document's extracted table together with its premium terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub table: ProductTable,
    pub terms: PlanTerms,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCell {
    pub plan_id: u32,
    pub record: Option<YearRecord>,
    pub actual_investment: f64,
    pub simple_annualized_return: Option<f64>,
    pub compound_annual_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanComparisonRow {
    pub policy_year: u32,
    pub cells: Vec<PlanCell>,
}

/// One row per requested policy year, one cell per plan
pub fn compare_plans(plans: &[PlanDocument], years: &[u32]) -> Vec<PlanComparisonRow> {
    years
        .iter()
        .map(|&year| PlanComparisonRow {
            policy_year: year,
            cells: plans.iter().map(|plan| plan_cell(plan, year)).collect(),
        })
        .collect()
}

fn plan_cell(plan: &PlanDocument, year: u32) -> PlanCell {
    let record = plan.table.record(year).copied();
    let invested = plan.terms.invested_by(year);
    let value = record.map(|r| r.total).unwrap_or(0.0);

    PlanCell {
        plan_id: plan.table.id,
        record,
        actual_investment: invested,
        simple_annualized_return: simple_annualized_return(value, invested, year),
        compound_annual_growth_rate: compound_annual_growth_rate(value, invested, year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn plan(id: u32, annual_premium: f64, payment_years: u32, values: &[(u32, f64)]) -> PlanDocument {
        let records = values
            .iter()
            .map(|&(year, total)| {
                let paid = annual_premium * year.min(payment_years) as f64;
                YearRecord::new(year, total, 0.0, paid)
            })
            .collect();
        PlanDocument {
            table: ProductTable::new(id, format!("Plan {}", id), records),
            terms: PlanTerms {
                annual_premium,
                payment_years,
            },
        }
    }

    #[test]
    fn test_plan_rows() {
        let plans = vec![
            plan(1, 10_000.0, 5, &[(10, 60_000.0), (20, 100_000.0)]),
            plan(2, 20_000.0, 2, &[(10, 50_000.0)]),
        ];

        let rows = compare_plans(&plans, &[10, 20]);
        assert_eq!(rows.len(), 2);

        let first = &rows[0].cells[0];
        assert_abs_diff_eq!(first.actual_investment, 50_000.0);
        assert_abs_diff_eq!(first.simple_annualized_return.unwrap(), 2.0, epsilon = 1e-12);
        // 1.2^(1/10) - 1
        assert_abs_diff_eq!(first.compound_annual_growth_rate.unwrap(), 1.8399, epsilon = 1e-4);

        let second = &rows[0].cells[1];
        assert_abs_diff_eq!(second.actual_investment, 40_000.0);
        assert_abs_diff_eq!(second.simple_annualized_return.unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_year_has_no_returns() {
        let plans = vec![plan(2, 20_000.0, 2, &[(10, 50_000.0)])];
        let rows = compare_plans(&plans, &[20]);
        let cell = &rows[0].cells[0];
        assert!(cell.record.is_none());
        assert_eq!(cell.simple_annualized_return, None);
        assert_eq!(cell.compound_annual_growth_rate, None);
    }

    #[test]
    fn test_zero_payment_terms_not_computable() {
        let plans = vec![plan(3, 10_000.0, 0, &[(5, 10_000.0)])];
        let rows = compare_plans(&plans, &[5]);
        assert_eq!(rows[0].cells[0].simple_annualized_return, None);
    }
}
