//! Schedule output structures

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::Result;
use crate::loan::LoanParameters;

/// One payment period of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment period (1-indexed)
    pub period: u32,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub ending_balance: f64,
}

/// Complete result of one amortization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Inputs the schedule was computed from
    pub parameters: LoanParameters,

    pub term_months: u32,

    /// Monthly rate as a fraction
    pub monthly_rate: f64,

    /// Level payment, constant over every period
    pub monthly_payment: f64,

    /// monthly_payment * term_months
    pub total_paid: f64,

    /// total_paid - principal
    pub total_interest: f64,

    /// Rows for periods 1..=term_months (empty when detailed output is off)
    pub schedule: Vec<ScheduleRow>,
}

impl AmortizationResult {
    /// Totals for the given parameters and payment; rows are added separately
    pub fn new(parameters: LoanParameters, monthly_payment: f64) -> Self {
        let term_months = parameters.term_months();
        let total_paid = monthly_payment * term_months as f64;
        Self {
            parameters,
            term_months,
            monthly_rate: parameters.monthly_rate(),
            monthly_payment,
            total_paid,
            total_interest: total_paid - parameters.principal,
            schedule: Vec::with_capacity(term_months as usize),
        }
    }

    /// Add a schedule row
    pub fn add_row(&mut self, row: ScheduleRow) {
        self.schedule.push(row);
    }

    /// Balance left after the last period. Not forced to zero; floating-point
    /// drift can leave a small residual.
    pub fn final_balance(&self) -> f64 {
        self.schedule
            .last()
            .map(|r| r.ending_balance)
            .unwrap_or(self.parameters.principal)
    }

    /// Inclusive period range a chart of this schedule must cover
    pub fn plot_range(&self) -> (u32, u32) {
        (1, self.term_months)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let principal_repaid: f64 = self.schedule.iter().map(|r| r.principal_portion).sum();
        let interest_accrued: f64 = self.schedule.iter().map(|r| r.interest_portion).sum();

        ScheduleSummary {
            term_months: self.term_months,
            monthly_payment: self.monthly_payment,
            total_paid: self.total_paid,
            total_interest: self.total_interest,
            principal_repaid,
            interest_accrued,
            final_balance: self.final_balance(),
        }
    }

    /// Write the schedule as CSV with a `Month,Interest,Principal,Balance` header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Month", "Interest", "Principal", "Balance"])?;

        for row in &self.schedule {
            csv_writer.write_record(&[
                row.period.to_string(),
                format!("{:.8}", row.interest_portion),
                format!("{:.8}", row.principal_portion),
                format!("{:.8}", row.ending_balance),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub principal_repaid: f64,
    pub interest_accrued: f64,
    pub final_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_period_result() -> AmortizationResult {
        let mut result = AmortizationResult::new(LoanParameters::new(0.0, 0.0, 1), 0.0);
        result.add_row(ScheduleRow {
            period: 1,
            interest_portion: 1.5,
            principal_portion: 10.0,
            ending_balance: 90.0,
        });
        result.add_row(ScheduleRow {
            period: 2,
            interest_portion: 0.5,
            principal_portion: 11.0,
            ending_balance: 79.0,
        });
        result
    }

    #[test]
    fn test_totals_by_construction() {
        let result = AmortizationResult::new(LoanParameters::new(1200.0, 0.0, 2), 50.0);
        assert_eq!(result.term_months, 24);
        assert_eq!(result.total_paid, 1200.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.plot_range(), (1, 24));
        assert!(result.schedule.is_empty());
        assert_eq!(result.final_balance(), 1200.0);
    }

    #[test]
    fn test_summary_sums_rows() {
        let summary = two_period_result().summary();
        assert_eq!(summary.principal_repaid, 21.0);
        assert_eq!(summary.interest_accrued, 2.0);
        assert_eq!(summary.final_balance, 79.0);
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        two_period_result().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Month,Interest,Principal,Balance");
        assert_eq!(lines[1], "1,1.50000000,10.00000000,90.00000000");
        assert_eq!(lines.len(), 3);
    }
}
