//! Closed-form return measures
//!
//! Two different "annual return" figures are shown side by side in
//! illustration screens and must not be confused:
//! - [`simple_annualized_return`]: gain over investment, divided by years
//!   (labelled 单利, simple interest)
//! - [`compound_annual_growth_rate`]: `(value / investment)^(1/years) - 1`,
//!   which the plan comparison screen labels "IRR". It is not the
//!   multi-payment IRR from [`super::irr`].

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Annualized simple return in percent.
///
/// `((terminal_value - actual_investment) / actual_investment / holding_years) * 100`.
/// None (never 0) when any input is zero, negative or non-finite.
pub fn simple_annualized_return(
    terminal_value: f64,
    actual_investment: f64,
    holding_years: u32,
) -> Option<f64> {
    if !positive(terminal_value) || !positive(actual_investment) || holding_years == 0 {
        return None;
    }
    Some((terminal_value - actual_investment) / actual_investment / holding_years as f64 * 100.0)
}

/// Compound annual growth rate in percent, treating the whole investment as
/// paid at the start.
pub fn compound_annual_growth_rate(
    terminal_value: f64,
    actual_investment: f64,
    holding_years: u32,
) -> Option<f64> {
    if !positive(terminal_value) || !positive(actual_investment) || holding_years == 0 {
        return None;
    }
    Some(((terminal_value / actual_investment).powf(1.0 / holding_years as f64) - 1.0) * 100.0)
}

/// Premium paid after `holding_years` on a plan with a limited payment term
pub fn actual_investment(annual_premium: f64, holding_years: u32, payment_years: u32) -> f64 {
    annual_premium * holding_years.min(payment_years) as f64
}

/// Value as a multiple of the investment (e.g. 2.0 for doubled)
pub fn return_multiple(value: f64, investment: f64) -> Option<f64> {
    if !positive(investment) || !value.is_finite() {
        return None;
    }
    Some(value / investment)
}
