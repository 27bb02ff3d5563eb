//! Return calculations over illustration tables: IRR, simple return,
//! CAGR, break-even and milestones

mod analysis;
mod breakeven;
pub mod irr;
mod metrics;
mod schedule;
mod simple;

pub use analysis::{PlanAnalysis, PlanTerms, StageReturn, STAGE_YEARS};
pub use breakeven::{
    break_even_year, first_year_reaching, return_milestones, ReturnMilestone,
    MILESTONE_MULTIPLIERS,
};
pub use irr::{solve_irr, solve_irr_detailed, IrrFailure, IrrSolution, SolverParams};
pub use metrics::{compute_return_metrics, ReturnMetrics};
pub use schedule::{yearly_premiums, CashFlowSchedule};
pub use simple::{
    actual_investment, compound_annual_growth_rate, return_multiple, simple_annualized_return,
};
