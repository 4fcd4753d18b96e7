//! Error taxonomy for the amortization engine and parameter controller

use thiserror::Error;

/// Errors surfaced by computation, control handling and loading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmortizationError {
    /// Principal, rate or term outside the domain the engine accepts
    #[error("invalid parameter: {field} = {value} ({reason})")]
    InvalidParameter {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A control identifier the controller does not manage
    #[error("unrecognized control: {0}")]
    UnrecognizedControl(String),

    /// Raw slider position outside the control's configured range
    #[error("{control} position {position} outside range {min}..={max}")]
    PositionOutOfRange {
        control: &'static str,
        position: i64,
        min: i64,
        max: i64,
    },

    /// CSV or IO failure while reading loans or control ranges
    #[error("load error: {0}")]
    Load(String),
}

impl AmortizationError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        AmortizationError::InvalidParameter {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

impl From<csv::Error> for AmortizationError {
    fn from(err: csv::Error) -> Self {
        AmortizationError::Load(err.to_string())
    }
}

impl From<std::io::Error> for AmortizationError {
    fn from(err: std::io::Error) -> Self {
        AmortizationError::Load(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AmortizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = AmortizationError::invalid("principal", -1.0, "must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid parameter: principal = -1 (must be non-negative)"
        );
    }

    #[test]
    fn test_position_out_of_range_message() {
        let err = AmortizationError::PositionOutOfRange {
            control: "Term",
            position: 41,
            min: 1,
            max: 40,
        };
        assert_eq!(err.to_string(), "Term position 41 outside range 1..=40");
    }
}
