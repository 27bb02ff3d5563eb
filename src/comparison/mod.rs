//! Multi-product comparison tables

mod aggregator;
mod engine;
mod plans;
mod premium;
mod years;

pub use aggregator::{best_total_flags, flag_best_totals, ComparisonRow, ProductCell};
pub use engine::{ComparisonEngine, ComparisonTable, ProductSummary};
pub use plans::{compare_plans, PlanCell, PlanComparisonRow, PlanDocument};
pub use premium::{premium_ratio, standard_annual_premium, DEFAULT_STANDARD_PREMIUM, MIN_ANNUAL_PREMIUM};
pub use years::{
    available_years, parse_custom_years, select_target_years, DEFAULT_TARGET_YEARS,
    MAX_FALLBACK_YEARS,
};
