//! Company comparison: rescale each company's standard table to the
//! customer's premium and compute returns at the selected years

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::aggregator::{flag_best_totals, ComparisonRow, ProductCell};
use super::premium::{premium_ratio, standard_annual_premium};
use super::years::{available_years, select_target_years};
use crate::config::ComparisonConfig;
use crate::error::{Result, ReturnsError};
use crate::policy::ProductTable;
use crate::returns::compute_return_metrics;

/// Identifier and name of a compared product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: u32,
    pub name: String,
}

/// Complete comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub annual_premium: f64,
    /// Premium the reference table was illustrated at
    pub standard_annual_premium: f64,
    pub premium_ratio: f64,
    pub products: Vec<ProductSummary>,
    /// Every policy year reported by any product
    pub all_years: Vec<u32>,
    pub target_years: Vec<u32>,
    /// One row per target year, in ascending order
    pub rows: Vec<ComparisonRow>,
}

/// Builds comparison tables under one configuration
///
/// # Example
/// ```ignore
/// let engine = ComparisonEngine::new(ComparisonConfig::default());
/// let table = engine.compare(&load_company_tables("companies.json")?)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: ComparisonConfig,
}

impl ComparisonEngine {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compare the given products.
    ///
    /// The first product's first-year premium is the reference the premium
    /// ratio is computed against. Rows are independent and computed in parallel.
    pub fn compare(&self, products: &[ProductTable]) -> Result<ComparisonTable> {
        let reference = products.first().ok_or(ReturnsError::NoProducts)?;

        let missing: Vec<String> = products
            .iter()
            .filter(|p| !p.has_data())
            .map(|p| p.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ReturnsError::MissingStandardData(missing));
        }

        let annual_premium = self.config.annual_premium;
        let standard = standard_annual_premium(reference);
        let ratio = premium_ratio(annual_premium, self.config.min_annual_premium, reference)?;
        info!(
            "premium ratio {:.4} (annual premium {}, standard premium {})",
            ratio, annual_premium, standard
        );

        let scaled: Vec<ProductTable> = products.iter().map(|p| p.scaled(ratio)).collect();

        let available = available_years(&scaled);
        let target_years = select_target_years(&available, self.config.custom_years.as_deref())?;

        let rows: Vec<ComparisonRow> = target_years
            .par_iter()
            .map(|&year| self.build_row(&scaled, year))
            .collect();

        Ok(ComparisonTable {
            annual_premium,
            standard_annual_premium: standard,
            premium_ratio: ratio,
            products: products
                .iter()
                .map(|p| ProductSummary {
                    id: p.id,
                    name: p.name.clone(),
                })
                .collect(),
            all_years: available.into_iter().collect(),
            target_years,
            rows,
        })
    }

    fn build_row(&self, scaled: &[ProductTable], year: u32) -> ComparisonRow {
        let annual_premium = self.config.annual_premium;

        // All products share the premium column; the first product's figure is shown
        let premiums_paid = scaled
            .first()
            .and_then(|p| p.record(year))
            .map(|r| r.premiums_paid)
            .unwrap_or(annual_premium * year as f64);

        let mut cells: Vec<ProductCell> = scaled
            .iter()
            .map(|product| ProductCell {
                product_id: product.id,
                product_name: product.name.clone(),
                record: product.record(year).copied(),
                metrics: compute_return_metrics(&product.records, year, annual_premium),
                is_best_total: false,
            })
            .collect();
        flag_best_totals(&mut cells);

        ComparisonRow {
            policy_year: year,
            premiums_paid,
            attained_age: self.config.customer_age.and_then(|age| age.checked_add(year)),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::YearRecord;
    use approx::assert_abs_diff_eq;

    /// Level 10000 premium for `pay` years, value growing by `growth` per year after year 1
    fn company(id: u32, name: &str, pay: u32, growth: f64) -> ProductTable {
        let records = (1..=30)
            .map(|y| {
                let paid = 10_000.0 * y.min(pay) as f64;
                let guaranteed = paid * 0.6;
                let bonus = paid * growth * (y - 1) as f64;
                YearRecord::new(y, guaranteed, bonus, paid)
            })
            .collect();
        ProductTable::new(id, name, records)
    }

    #[test]
    fn test_compare_rescales_to_customer_premium() {
        let engine = ComparisonEngine::new(ComparisonConfig {
            annual_premium: 20_000.0,
            ..Default::default()
        });
        let products = vec![company(1, "Alpha", 5, 0.08), company(2, "Beta", 5, 0.06)];

        let table = engine.compare(&products).unwrap();
        assert_abs_diff_eq!(table.premium_ratio, 2.0);
        assert_abs_diff_eq!(table.standard_annual_premium, 10_000.0);
        assert_eq!(table.target_years, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20, 25, 30]);
        assert_eq!(table.all_years.len(), 30);

        let year_10 = table.rows.iter().find(|r| r.policy_year == 10).unwrap();
        assert_abs_diff_eq!(year_10.premiums_paid, 100_000.0);
        let alpha = &year_10.cells[0];
        assert_abs_diff_eq!(alpha.record.unwrap().premiums_paid, 100_000.0);
        assert!(alpha.is_best_total);
        assert!(!year_10.cells[1].is_best_total);

        // Source tables are not modified
        assert_abs_diff_eq!(products[0].record(10).unwrap().premiums_paid, 50_000.0);
    }

    #[test]
    fn test_rows_in_target_year_order() {
        let engine = ComparisonEngine::default();
        let table = engine.compare(&[company(1, "Alpha", 10, 0.05)]).unwrap();
        let years: Vec<u32> = table.rows.iter().map(|r| r.policy_year).collect();
        assert_eq!(years, table.target_years);
    }

    #[test]
    fn test_metrics_present_once_value_exceeds_premium() {
        let engine = ComparisonEngine::default();
        let table = engine.compare(&[company(1, "Alpha", 5, 0.08)]).unwrap();

        let year_20 = table.rows.iter().find(|r| r.policy_year == 20).unwrap();
        let metrics = year_20.cells[0].metrics;
        assert!(metrics.irr.unwrap() > 0.0);
        assert!(metrics.simple_annualized_return.unwrap() > 0.0);
        assert!(metrics.break_even_year.is_some());

        let year_1 = &table.rows[0];
        assert!(year_1.cells[0].metrics.simple_annualized_return.unwrap() < 0.0);
    }

    #[test]
    fn test_identical_products_all_best() {
        let engine = ComparisonEngine::default();
        let products = vec![
            company(1, "Alpha", 5, 0.08),
            company(2, "Beta", 5, 0.08),
            company(3, "Gamma", 5, 0.08),
        ];
        let table = engine.compare(&products).unwrap();
        let year_10 = table.rows.iter().find(|r| r.policy_year == 10).unwrap();
        assert!(year_10.cells.iter().all(|c| c.is_best_total));
    }

    #[test]
    fn test_custom_years_and_attained_age() {
        let engine = ComparisonEngine::new(ComparisonConfig {
            custom_years: Some("10，3 99".to_string()),
            customer_age: Some(40),
            ..Default::default()
        });
        let table = engine.compare(&[company(1, "Alpha", 5, 0.08)]).unwrap();
        assert_eq!(table.target_years, vec![3, 10]);
        assert_eq!(table.rows[1].attained_age, Some(50));
    }

    #[test]
    fn test_attained_age_overflow_is_empty() {
        let engine = ComparisonEngine::new(ComparisonConfig {
            custom_years: Some("10".to_string()),
            customer_age: Some(u32::MAX - 5),
            ..Default::default()
        });
        let table = engine.compare(&[company(1, "Alpha", 5, 0.08)]).unwrap();
        assert_eq!(table.rows[0].policy_year, 10);
        assert_eq!(table.rows[0].attained_age, None);
    }

    #[test]
    fn test_comparison_errors() {
        let engine = ComparisonEngine::default();
        assert!(matches!(engine.compare(&[]), Err(ReturnsError::NoProducts)));

        let empty = ProductTable::new(9, "No Data Life", Vec::new());
        match engine.compare(&[company(1, "Alpha", 5, 0.08), empty]) {
            Err(ReturnsError::MissingStandardData(names)) => assert_eq!(names, vec!["No Data Life"]),
            other => panic!("unexpected result: {:?}", other),
        }

        let cheap = ComparisonEngine::new(ComparisonConfig {
            annual_premium: 1_000.0,
            ..Default::default()
        });
        assert!(matches!(
            cheap.compare(&[company(1, "Alpha", 5, 0.08)]),
            Err(ReturnsError::PremiumBelowMinimum { .. })
        ));
    }

    #[test]
    fn test_missing_year_in_second_product() {
        let engine = ComparisonEngine::default();
        let mut sparse = company(2, "Beta", 5, 0.08);
        sparse.records.retain(|r| r.policy_year != 10);

        let table = engine.compare(&[company(1, "Alpha", 5, 0.06), sparse]).unwrap();
        let year_10 = table.rows.iter().find(|r| r.policy_year == 10).unwrap();
        let beta = &year_10.cells[1];
        assert!(beta.record.is_none());
        assert_eq!(beta.metrics.irr, None);
        assert_eq!(beta.metrics.simple_annualized_return, None);
        assert!(year_10.cells[0].is_best_total);
    }
}
