//! Load batches of loans from CSV

use super::LoanParameters;
use crate::error::Result;
use csv::Reader;
use serde::Serialize;
use std::path::Path;

/// Raw CSV row: `loan_id,principal,annual_rate_percent,term_years`
/// (`loan_id` is optional; rows are numbered from 1 when it is absent)
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    loan_id: Option<u32>,
    principal: f64,
    #[serde(alias = "rate")]
    annual_rate_percent: f64,
    #[serde(alias = "years")]
    term_years: u32,
}

/// A loan read from a batch file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanRecord {
    pub loan_id: u32,
    pub parameters: LoanParameters,
}

impl CsvRow {
    fn into_record(self, row_number: u32) -> LoanRecord {
        LoanRecord {
            loan_id: self.loan_id.unwrap_or(row_number),
            parameters: LoanParameters::new(self.principal, self.annual_rate_percent, self.term_years),
        }
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>> {
    let reader = Reader::from_path(path)?;
    collect_records(reader)
}

/// Load loans from any reader (e.g., string buffer, stdin)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanRecord>> {
    collect_records(Reader::from_reader(reader))
}

fn collect_records<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanRecord>> {
    let mut loans = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        loans.push(row.into_record(idx as u32 + 1));
    }

    log::debug!("loaded {} loans", loans.len());
    Ok(loans)
}
