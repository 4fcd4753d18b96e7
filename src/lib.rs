//! Loan Amortization - fixed-rate, fixed-term amortization schedules
//!
//! This library provides:
//! - The level monthly payment and per-period interest/principal/balance schedule
//! - A parameter controller that mirrors slider positions while they are dragged
//!   and recomputes the schedule once when a slider is released
//! - CSV loading of control ranges and loan batches, and parallel batch runs

pub mod error;
pub mod loan;
pub mod schedule;
pub mod controls;
pub mod batch;

// Re-export commonly used types
pub use error::{AmortizationError, Result};
pub use loan::LoanParameters;
pub use schedule::{compute, AmortizationEngine, AmortizationResult, ScheduleRow};
pub use controls::{ControlConfig, ControlEvent, ControlId, ParameterController, ScheduleSink};
pub use batch::BatchRunner;
