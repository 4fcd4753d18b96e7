//! Input parameters of a fixed-rate, fixed-term loan

use serde::{Deserialize, Serialize};

use crate::error::{AmortizationError, Result};

/// Payment periods per year (monthly schedule only)
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest term accepted; bounds the schedule allocation
pub const MAX_TERM_YEARS: u32 = 1000;

/// The three inputs of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Original loan amount
    pub principal: f64,

    /// Nominal annual rate in percent (3.0 means 3%)
    pub annual_rate_percent: f64,

    /// Loan duration in years
    pub term_years: u32,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Number of monthly payments
    pub fn term_months(&self) -> u32 {
        self.term_years.saturating_mul(MONTHS_PER_YEAR)
    }

    /// Monthly rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Check the domain: principal >= 0, rate >= 0, 1 <= term <= MAX_TERM_YEARS.
    /// NaN and infinite amounts are rejected.
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(AmortizationError::invalid(
                "principal",
                self.principal,
                "must be a finite, non-negative amount",
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(AmortizationError::invalid(
                "annual_rate_percent",
                self.annual_rate_percent,
                "must be a finite, non-negative percentage",
            ));
        }
        if self.term_years == 0 {
            return Err(AmortizationError::invalid(
                "term_years",
                self.term_years,
                "must be at least one year",
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(AmortizationError::invalid(
                "term_years",
                self.term_years,
                "exceeds the longest supported term",
            ));
        }
        Ok(())
    }
}
