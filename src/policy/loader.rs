//! Load year records from CSV tables and the company comparison payload

use super::{ProductTable, RawYearRecord, YearRecord};
use crate::error::Result;
use csv::Reader;
use log::warn;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One company entry as returned by `/api/insurance-companies/standard-comparison/`
#[derive(Debug, Deserialize)]
struct CompanyEntry {
    id: u32,
    name: String,
    #[serde(default)]
    has_data: Option<bool>,
    #[serde(default)]
    standard_data: Option<StandardData>,
}

#[derive(Debug, Deserialize)]
struct StandardData {
    #[serde(default)]
    standard: Vec<RawYearRecord>,
}

impl CompanyEntry {
    fn into_table(self) -> Result<ProductTable> {
        let rows = match (self.has_data, self.standard_data) {
            (Some(false), _) | (_, None) => Vec::new(),
            (_, Some(data)) => data.standard,
        };

        let records = rows
            .into_iter()
            .map(RawYearRecord::into_record)
            .collect::<Result<Vec<_>>>()?;

        if records.is_empty() {
            warn!("company {} ({}) has no standard data", self.id, self.name);
        }

        Ok(ProductTable::new(self.id, self.name, records))
    }
}

/// Load year records from a CSV file
///
/// Expected columns: `policy_year,guaranteed,non_guaranteed,total,premiums_paid`.
/// `total` may be left empty and is then derived.
pub fn load_year_records<P: AsRef<Path>>(path: P) -> Result<Vec<YearRecord>> {
    let file = File::open(path)?;
    load_year_records_from_reader(file)
}

/// Load year records from any reader (e.g., string buffer, network stream)
pub fn load_year_records_from_reader<R: Read>(reader: R) -> Result<Vec<YearRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: RawYearRecord = result?;
        records.push(row.into_record()?);
    }

    Ok(records)
}

/// Load the company comparison payload from a JSON file
pub fn load_company_tables<P: AsRef<Path>>(path: P) -> Result<Vec<ProductTable>> {
    let file = File::open(path)?;
    let entries: Vec<CompanyEntry> = serde_json::from_reader(file)?;
    entries.into_iter().map(CompanyEntry::into_table).collect()
}

/// Parse the company comparison payload from a JSON string
pub fn parse_company_tables(json: &str) -> Result<Vec<ProductTable>> {
    let entries: Vec<CompanyEntry> = serde_json::from_str(json)?;
    entries.into_iter().map(CompanyEntry::into_table).collect()
}

/// Parse an already-decoded JSON value holding the company payload
pub fn company_tables_from_value(value: serde_json::Value) -> Result<Vec<ProductTable>> {
    let entries: Vec<CompanyEntry> = serde_json::from_value(value)?;
    entries.into_iter().map(CompanyEntry::into_table).collect()
}
