//! Core amortization engine: level payment and monthly balance roll-forward

use crate::error::Result;
use crate::loan::LoanParameters;
use super::rows::{AmortizationResult, ScheduleRow};
use super::state::BalanceState;

/// Configuration for an amortization run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether to build the per-period rows (totals are always computed)
    pub detailed_output: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
        }
    }
}

/// Level monthly payment of an annuity loan.
///
/// payment = P * r / (1 - (1 + r)^-n), with the zero-rate case P / n
/// (the closed form is 0/0 at r = 0). The discount term is evaluated as
/// -expm1(-n * ln1p(r)) so it stays accurate when 1 + r rounds to 1.
pub fn level_payment(principal: f64, monthly_rate: f64, term_months: u32) -> f64 {
    let n = term_months as f64;
    if monthly_rate == 0.0 {
        return principal / n;
    }
    let annuity_discount = -(-n * monthly_rate.ln_1p()).exp_m1();
    principal * monthly_rate / annuity_discount
}

/// Compute a full schedule with the default configuration
pub fn compute(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<AmortizationResult> {
    AmortizationEngine::default().compute(principal, annual_rate_percent, term_years)
}

/// Main amortization engine
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: EngineConfig,
}

impl AmortizationEngine {
    /// Create a new engine with the given config
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute payment, totals and schedule for the given inputs
    pub fn compute(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
    ) -> Result<AmortizationResult> {
        self.compute_params(&LoanParameters::new(principal, annual_rate_percent, term_years))
    }

    /// Compute payment, totals and schedule for a parameter set.
    /// Fails with `InvalidParameter` before any arithmetic when out of domain.
    pub fn compute_params(&self, params: &LoanParameters) -> Result<AmortizationResult> {
        params.validate()?;

        let monthly_rate = params.monthly_rate();
        let term_months = params.term_months();
        let payment = level_payment(params.principal, monthly_rate, term_months);

        log::debug!(
            "amortizing principal={} rate={}% months={} payment={:.6}",
            params.principal,
            params.annual_rate_percent,
            term_months,
            payment
        );

        let mut result = AmortizationResult::new(*params, payment);
        if !self.config.detailed_output {
            return Ok(result);
        }

        let mut state = BalanceState::at_origination(params.principal);
        for _month in 1..=term_months {
            state.advance_month();
            let row = Self::calculate_month(&mut state, monthly_rate, payment);
            result.add_row(row);
        }

        Ok(result)
    }

    /// Split one payment into interest and principal and roll the balance.
    /// No rounding: amounts are carried at full precision.
    fn calculate_month(state: &mut BalanceState, monthly_rate: f64, payment: f64) -> ScheduleRow {
        let interest_portion = state.interest_due(monthly_rate);
        let principal_portion = payment - interest_portion;
        state.repay(principal_portion);

        ScheduleRow {
            period: state.period,
            interest_portion,
            principal_portion,
            ending_balance: state.ending_balance,
        }
    }
}
