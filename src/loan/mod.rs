//! Loan parameters and loan batch loading

mod params;
pub mod loader;

pub use params::{LoanParameters, MAX_TERM_YEARS, MONTHS_PER_YEAR};
pub use loader::{load_loans, load_loans_from_reader, LoanRecord};
