//! Selection of the policy years shown in a comparison table

use std::collections::BTreeSet;

use crate::error::{Result, ReturnsError};
use crate::policy::ProductTable;

/// Key policy years shown by default, when the data has them
pub const DEFAULT_TARGET_YEARS: [u32; 19] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20, 25, 30, 35, 40, 60, 80, 100,
];

/// Cap on years picked by the fallback rule
pub const MAX_FALLBACK_YEARS: usize = 20;

/// Union of the policy years reported by any product
pub fn available_years(products: &[ProductTable]) -> BTreeSet<u32> {
    products.iter().flat_map(|p| p.policy_years()).collect()
}

/// Parse a free-text list of years.
///
/// Tokens are separated by commas (ASCII or full-width `，`) and whitespace.
/// Each token contributes its leading digits; tokens without any are skipped.
pub fn parse_custom_years(input: &str) -> Vec<u32> {
    input
        .split(|c: char| c == ',' || c == '，' || c.is_whitespace())
        .filter_map(|token| {
            let digits: String = token.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .collect()
}

/// Pick the target years for a comparison.
///
/// A non-blank `custom` list is intersected with the available years and
/// must leave at least one. Otherwise the default key years are used, and
/// when none of those exist, the first, the last and every fifth year.
pub fn select_target_years(available: &BTreeSet<u32>, custom: Option<&str>) -> Result<Vec<u32>> {
    if let Some(input) = custom.filter(|s| !s.trim().is_empty()) {
        let chosen: BTreeSet<u32> = parse_custom_years(input)
            .into_iter()
            .filter(|year| available.contains(year))
            .collect();

        if chosen.is_empty() {
            return Err(ReturnsError::NoMatchingYears);
        }
        return Ok(chosen.into_iter().collect());
    }

    let defaults: Vec<u32> = available
        .iter()
        .copied()
        .filter(|year| DEFAULT_TARGET_YEARS.contains(year))
        .collect();

    if !defaults.is_empty() {
        return Ok(defaults);
    }

    let last_index = available.len().saturating_sub(1);
    Ok(available
        .iter()
        .enumerate()
        .filter(|&(index, &year)| index == 0 || index == last_index || year % 5 == 0)
        .map(|(_, &year)| year)
        .take(MAX_FALLBACK_YEARS)
        .collect())
}
