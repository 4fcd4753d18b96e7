//! Slider controls and the parameter controller
//!
//! A rendering collaborator owns three sliders (principal, rate, term). While a
//! slider is dragged it reports raw positions, which are mirrored into the
//! current parameters without recomputing. When the slider is released the
//! controller recomputes the schedule once and publishes it.
//!
//! ```text
//!   Idle --adjusting--> Dragging --adjusting--> Dragging --released--> Idle
//!                       (live change)                     (commit)
//! ```

mod config;
mod controller;
pub mod loader;

pub use config::{ControlConfig, ControlRange};
pub use controller::ParameterController;

use std::fmt;
use std::str::FromStr;

use crate::error::AmortizationError;
use crate::loan::LoanParameters;
use crate::schedule::AmortizationResult;

/// The closed set of controls the controller manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Principal,
    Rate,
    Term,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [ControlId::Principal, ControlId::Rate, ControlId::Term];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlId::Principal => "Principal",
            ControlId::Rate => "Rate",
            ControlId::Term => "Term",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ControlId::Principal => 0,
            ControlId::Rate => 1,
            ControlId::Term => 2,
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlId {
    type Err = AmortizationError;

    /// Accepts control names and the spreadsheet widget names `ScrollBar_0..2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "principal" | "scrollbar_0" => Ok(ControlId::Principal),
            "rate" | "interest" | "scrollbar_1" => Ok(ControlId::Rate),
            "term" | "years" | "scrollbar_2" => Ok(ControlId::Term),
            _ => Err(AmortizationError::UnrecognizedControl(s.to_string())),
        }
    }
}

/// Drag state of a single control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    Dragging,
}

/// Event delivered by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Position update while the control is held
    Adjusting { control: ControlId, position: i64 },
    /// Control released at its final position
    Released { control: ControlId, position: i64 },
}

/// Receiver of controller output (label updates and committed schedules)
pub trait ScheduleSink {
    /// A parameter label changed without recomputation
    fn on_live_change(&mut self, control: ControlId, parameters: &LoanParameters);

    /// A new schedule was committed
    fn on_commit(&mut self, result: &AmortizationResult);
}
