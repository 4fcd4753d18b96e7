//! Amortization engine: payment formula, balance recurrence and schedule output

mod state;
mod engine;
mod rows;

pub use state::BalanceState;
pub use engine::{compute, level_payment, AmortizationEngine, EngineConfig};
pub use rows::{AmortizationResult, ScheduleRow, ScheduleSummary};
