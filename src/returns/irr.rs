//! Internal Rate of Return (IRR) of a premium schedule
//!
//! Premiums go out, the surrender value comes back once at the end of the
//! holding period. Solved with Newton-Raphson.

use log::warn;

use crate::policy::MAX_POLICY_YEAR;

/// Horizons longer than this use the long-horizon seed and tolerance
pub const LONG_HORIZON_YEARS: u32 = 50;

/// Iteration budget for one solve
pub const MAX_ITERATIONS: u32 = 200;

/// Largest rate reported as valid (100%)
pub const MAX_VALID_RATE: f64 = 1.0;

const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 2.0;
const MIN_DERIVATIVE: f64 = 1e-7;
const MAX_STEP: f64 = 1.0;
const STEP_DAMPING: f64 = 0.5;

/// Newton-Raphson settings for a given horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Starting rate (decimal)
    pub initial_rate: f64,
    /// Converged once |NPV| falls below this
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl SolverParams {
    /// Long horizons need a smaller seed and a looser tolerance to converge
    pub fn for_horizon(holding_years: u32) -> Self {
        if holding_years > LONG_HORIZON_YEARS {
            Self {
                initial_rate: 0.03,
                tolerance: 0.001,
                max_iterations: MAX_ITERATIONS,
            }
        } else {
            Self {
                initial_rate: 0.05,
                tolerance: 0.0001,
                max_iterations: MAX_ITERATIONS,
            }
        }
    }
}

/// Why a solve produced no rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrrFailure {
    /// Empty schedule, non-positive terminal value, or holding years of zero
    /// or past [`MAX_POLICY_YEAR`]
    NotComputable,
    /// A root was found but lies above 100%
    AboveCap { rate: f64 },
    /// Derivative vanished, Newton cannot make progress
    FlatDerivative { iteration: u32, rate: f64 },
    /// Iteration budget exhausted
    NotConverged { rate: f64 },
}

/// A converged solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    /// Annual rate as a decimal
    pub rate: f64,
    /// Iterations used before |NPV| fell below tolerance
    pub iterations: u32,
    pub params: SolverParams,
}

impl IrrSolution {
    pub fn percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Calculate the IRR of a cumulative premium schedule, as a percentage.
///
/// # Arguments
/// * `yearly_premiums` - Cumulative premium paid through each policy year
/// * `terminal_value` - Value received at the end of `holding_years`
/// * `holding_years` - Length of the holding period
///
/// # Returns
/// * `Option<f64>` - IRR in percent (e.g. 4.2 for 4.2%), or None when the
///   schedule is not computable, diverges, or solves above 100%
pub fn solve_irr(yearly_premiums: &[f64], terminal_value: f64, holding_years: u32) -> Option<f64> {
    match solve_irr_detailed(yearly_premiums, terminal_value, holding_years) {
        Ok(solution) => Some(solution.percent()),
        Err(IrrFailure::NotComputable) => None,
        Err(IrrFailure::AboveCap { rate }) => {
            warn!(
                "IRR above cap: {:.2}% (holding {} years, terminal value {}, {} premium years)",
                rate * 100.0,
                holding_years,
                terminal_value,
                yearly_premiums.len()
            );
            None
        }
        Err(failure) => {
            warn!(
                "IRR did not converge: {:?} (holding {} years, terminal value {}, {} premium years)",
                failure,
                holding_years,
                terminal_value,
                yearly_premiums.len()
            );
            None
        }
    }
}

/// Same as [`solve_irr`] but reports how the solve ended
pub fn solve_irr_detailed(
    yearly_premiums: &[f64],
    terminal_value: f64,
    holding_years: u32,
) -> Result<IrrSolution, IrrFailure> {
    if yearly_premiums.is_empty()
        || holding_years == 0
        || holding_years > MAX_POLICY_YEAR
        || !terminal_value.is_finite()
        || terminal_value <= 0.0
    {
        return Err(IrrFailure::NotComputable);
    }

    let params = SolverParams::for_horizon(holding_years);
    let payments = premium_payments(yearly_premiums, holding_years);
    let mut rate = params.initial_rate;

    for iteration in 0..params.max_iterations {
        let (npv, dnpv) = npv_and_derivative(&payments, terminal_value, holding_years, rate);

        if npv.abs() < params.tolerance {
            if rate > MAX_VALID_RATE {
                return Err(IrrFailure::AboveCap { rate });
            }
            return Ok(IrrSolution {
                rate,
                iterations: iteration,
                params,
            });
        }

        if dnpv.abs() < MIN_DERIVATIVE {
            return Err(IrrFailure::FlatDerivative { iteration, rate });
        }

        let step = npv / dnpv;
        rate -= if step.abs() > MAX_STEP { step * STEP_DAMPING } else { step };
        rate = rate.clamp(MIN_RATE, MAX_RATE);
    }

    Err(IrrFailure::NotConverged { rate })
}

/// Premium actually paid in each year `1..=holding_years`.
///
/// The payment is the increase in cumulative premium over the previous year.
/// A decrease (bad source data) is dropped rather than treated as an inflow.
/// Years beyond the end of the schedule count as nothing paid.
fn premium_payments(yearly_premiums: &[f64], holding_years: u32) -> Vec<f64> {
    let paid_through = |year: u32| -> f64 {
        if year == 0 {
            return 0.0;
        }
        yearly_premiums.get(year as usize - 1).copied().unwrap_or(0.0)
    };

    (1..=holding_years)
        .map(|year| (paid_through(year) - paid_through(year - 1)).max(0.0))
        .collect()
}

/// NPV and dNPV/drate of the schedule.
///
/// The premium for year y is paid at time y - 1, the terminal value is
/// received at time `holding_years`.
fn npv_and_derivative(payments: &[f64], terminal_value: f64, holding_years: u32, rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &payment) in payments.iter().enumerate() {
        if payment > 0.0 {
            npv -= payment / base.powi(t as i32);
            dnpv += payment * t as f64 / base.powi(t as i32 + 1);
        }
    }

    let n = holding_years as i32;
    npv += terminal_value / base.powi(n);
    dnpv -= terminal_value * n as f64 / base.powi(n + 1);

    (npv, dnpv)
}
