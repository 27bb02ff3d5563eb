//! Year-by-year illustration data for a single product

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ReturnsError};

/// Latest policy year accepted from a table
pub const MAX_POLICY_YEAR: u32 = 150;

/// One policy year's reported values for one product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Policy year, starting at 1
    pub policy_year: u32,

    /// Guaranteed cash value
    pub guaranteed: f64,

    /// Non-guaranteed cash value (reversionary/terminal bonus)
    pub non_guaranteed: f64,

    /// Total surrender value, guaranteed + non-guaranteed as reported.
    /// Scaled copies round each field on its own, so the sum may be off by 1.
    pub total: f64,

    /// Cumulative premium paid through this policy year
    pub premiums_paid: f64,
}

impl YearRecord {
    /// Create a record, deriving the total from its two components
    pub fn new(policy_year: u32, guaranteed: f64, non_guaranteed: f64, premiums_paid: f64) -> Self {
        Self {
            policy_year,
            guaranteed,
            non_guaranteed,
            total: guaranteed + non_guaranteed,
            premiums_paid,
        }
    }

    /// Copy of this record with every money field scaled by `ratio`
    /// and rounded to whole currency units.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            policy_year: self.policy_year,
            guaranteed: (self.guaranteed * ratio).round(),
            non_guaranteed: (self.non_guaranteed * ratio).round(),
            total: (self.total * ratio).round(),
            premiums_paid: (self.premiums_paid * ratio).round(),
        }
    }

    /// Whether the surrender value covers the premiums paid so far
    pub fn has_broken_even(&self) -> bool {
        self.total >= self.premiums_paid
    }
}

/// A table row as reported by the backend, where any value may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawYearRecord {
    pub policy_year: u32,
    #[serde(default)]
    pub guaranteed: Option<f64>,
    #[serde(default)]
    pub non_guaranteed: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub premiums_paid: Option<f64>,
}

impl RawYearRecord {
    /// Validate the row and fill in missing values.
    ///
    /// Missing components default to 0, a missing total is repaired from
    /// guaranteed + non-guaranteed. Negative or non-finite values are rejected.
    pub fn into_record(self) -> Result<YearRecord> {
        if self.policy_year == 0 {
            return Err(ReturnsError::InvalidRecord(
                "policy_year must be at least 1".to_string(),
            ));
        }
        if self.policy_year > MAX_POLICY_YEAR {
            return Err(ReturnsError::InvalidRecord(format!(
                "policy_year {} is beyond the last supported year {}",
                self.policy_year, MAX_POLICY_YEAR
            )));
        }

        let year = self.policy_year;
        let guaranteed = field_or_zero(year, "guaranteed", self.guaranteed)?;
        let non_guaranteed = field_or_zero(year, "non_guaranteed", self.non_guaranteed)?;
        let premiums_paid = field_or_zero(year, "premiums_paid", self.premiums_paid)?;

        let total = match self.total {
            Some(total) => check_amount(year, "total", total)?,
            None => guaranteed + non_guaranteed,
        };

        Ok(YearRecord {
            policy_year: year,
            guaranteed,
            non_guaranteed,
            total,
            premiums_paid,
        })
    }
}

fn field_or_zero(year: u32, field: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) => check_amount(year, field, v),
        None => {
            warn!("policy year {}: missing {}, using 0", year, field);
            Ok(0.0)
        }
    }
}

fn check_amount(year: u32, field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ReturnsError::InvalidRecord(format!(
            "policy year {}: {} must be a non-negative number, got {}",
            year, field, value
        )));
    }
    Ok(value)
}

/// The surrender value table of one product (or insurance company)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTable {
    /// Product or company identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Year records, sorted by policy year
    pub records: Vec<YearRecord>,
}

impl ProductTable {
    pub fn new(id: u32, name: impl Into<String>, mut records: Vec<YearRecord>) -> Self {
        records.sort_by_key(|r| r.policy_year);
        Self {
            id,
            name: name.into(),
            records,
        }
    }

    /// Whether the product has any standard data to compare
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    /// Record for an exact policy year
    pub fn record(&self, policy_year: u32) -> Option<&YearRecord> {
        self.records.iter().find(|r| r.policy_year == policy_year)
    }

    /// Policy years present in the table, in ascending order
    pub fn policy_years(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.iter().map(|r| r.policy_year)
    }

    /// Premium of the first reported year, used as the table's reference premium
    pub fn standard_annual_premium(&self) -> Option<f64> {
        self.records.first().map(|r| r.premiums_paid)
    }

    /// Scaled copy of the table; the original is left untouched
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            records: self.records.iter().map(|r| r.scaled(ratio)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_total_is_repaired_when_missing() {
        let raw = RawYearRecord {
            policy_year: 3,
            guaranteed: Some(12_000.0),
            non_guaranteed: Some(3_500.0),
            total: None,
            premiums_paid: Some(30_000.0),
        };

        let record = raw.into_record().unwrap();
        assert_abs_diff_eq!(record.total, 15_500.0);
    }

    #[test]
    fn test_reported_total_is_kept() {
        let raw = RawYearRecord {
            policy_year: 1,
            guaranteed: Some(100.0),
            non_guaranteed: Some(50.0),
            total: Some(150.0),
            premiums_paid: Some(10_000.0),
        };

        assert_abs_diff_eq!(raw.into_record().unwrap().total, 150.0);
    }

    #[test]
    fn test_missing_components_default_to_zero() {
        let raw = RawYearRecord {
            policy_year: 2,
            guaranteed: Some(800.0),
            ..Default::default()
        };

        let record = raw.into_record().unwrap();
        assert_abs_diff_eq!(record.non_guaranteed, 0.0);
        assert_abs_diff_eq!(record.total, 800.0);
        assert_abs_diff_eq!(record.premiums_paid, 0.0);
    }

    #[test]
    fn test_invalid_records_rejected() {
        let zero_year = RawYearRecord::default();
        assert!(matches!(zero_year.into_record(), Err(ReturnsError::InvalidRecord(_))));

        let negative = RawYearRecord {
            policy_year: 1,
            guaranteed: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.into_record().is_err());

        let nan = RawYearRecord {
            policy_year: 1,
            premiums_paid: Some(f64::NAN),
            ..Default::default()
        };
        assert!(nan.into_record().is_err());
    }

    #[test]
    fn test_policy_year_upper_bound() {
        let last = RawYearRecord {
            policy_year: MAX_POLICY_YEAR,
            total: Some(1_000.0),
            ..Default::default()
        };
        assert_eq!(last.into_record().unwrap().policy_year, MAX_POLICY_YEAR);

        let far = RawYearRecord {
            policy_year: 5_000_000,
            total: Some(1_000.0),
            ..Default::default()
        };
        assert!(matches!(far.into_record(), Err(ReturnsError::InvalidRecord(_))));
    }

    #[test]
    fn test_scaled_copy_rounds_and_leaves_source() {
        let table = ProductTable::new(
            1,
            "Alpha Life",
            vec![YearRecord::new(1, 3_333.0, 1_111.0, 10_000.0)],
        );

        let scaled = table.scaled(1.5);
        let r = scaled.record(1).unwrap();
        assert_abs_diff_eq!(r.guaranteed, 5_000.0); // 4999.5 rounds up
        assert_abs_diff_eq!(r.non_guaranteed, 1_667.0);
        assert_abs_diff_eq!(r.total, 6_666.0);
        assert_abs_diff_eq!(r.premiums_paid, 15_000.0);

        assert_abs_diff_eq!(table.records[0].guaranteed, 3_333.0);
    }

    #[test]
    fn test_records_sorted_by_year() {
        let table = ProductTable::new(
            7,
            "Beta",
            vec![
                YearRecord::new(3, 0.0, 0.0, 30.0),
                YearRecord::new(1, 0.0, 0.0, 10.0),
                YearRecord::new(2, 0.0, 0.0, 20.0),
            ],
        );

        assert_eq!(table.policy_years().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(table.standard_annual_premium(), Some(10.0));
        assert!(table.record(4).is_none());
    }
}
