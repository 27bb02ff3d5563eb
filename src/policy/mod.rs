//! Illustration table data structures and loading

mod data;
pub mod loader;

pub use data::{ProductTable, RawYearRecord, YearRecord, MAX_POLICY_YEAR};
pub use loader::{
    company_tables_from_value, load_company_tables, load_year_records,
    load_year_records_from_reader, parse_company_tables,
};
