//! Batch runner for computing many loans at once
//!
//! Holds one engine configuration and fans loans out across threads with rayon.

use rayon::prelude::*;

use crate::error::Result;
use crate::loan::{LoanParameters, LoanRecord};
use crate::schedule::{AmortizationEngine, AmortizationResult, EngineConfig};

/// Pre-configured runner for batches of loans
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::totals_only();
/// for result in runner.run(&loans) {
///     println!("{:.2}", result?.monthly_payment);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: AmortizationEngine,
}

impl BatchRunner {
    /// Runner producing full schedules
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner producing totals only (no per-period rows)
    pub fn totals_only() -> Self {
        Self::with_config(EngineConfig { detailed_output: false })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: AmortizationEngine::new(config),
        }
    }

    /// Compute every parameter set; results keep input order
    pub fn run_batch(&self, loans: &[LoanParameters]) -> Vec<Result<AmortizationResult>> {
        loans.par_iter().map(|p| self.engine.compute_params(p)).collect()
    }

    /// Compute loaded loan records, pairing each result with its loan id
    pub fn run(&self, loans: &[LoanRecord]) -> Vec<(u32, Result<AmortizationResult>)> {
        loans
            .par_iter()
            .map(|loan| (loan.loan_id, self.engine.compute_params(&loan.parameters)))
            .collect()
    }
}
