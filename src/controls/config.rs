//! Slider ranges and the position -> parameter mapping

use serde::{Deserialize, Serialize};

use super::ControlId;
use crate::error::{AmortizationError, Result};
use crate::loan::LoanParameters;

/// Range, default and scale of one slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlRange {
    pub min: i64,
    pub max: i64,
    pub default: i64,
    /// Parameter value per unit of slider position
    pub scale: f64,
}

impl ControlRange {
    pub const fn new(min: i64, max: i64, default: i64, scale: f64) -> Self {
        Self { min, max, default, scale }
    }

    pub fn contains(&self, position: i64) -> bool {
        (self.min..=self.max).contains(&position)
    }

    /// Linear mapping from slider position to parameter value
    pub fn value_at(&self, position: i64) -> f64 {
        position as f64 * self.scale
    }
}

/// Ranges of the three sliders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    pub principal: ControlRange,
    pub rate: ControlRange,
    pub term: ControlRange,
}

impl Default for ControlConfig {
    /// Principal 1..100 x10000, rate 1..100 x0.1 percent, term 1..40 years
    fn default() -> Self {
        Self {
            principal: ControlRange::new(1, 100, 3, 10_000.0),
            rate: ControlRange::new(1, 100, 30, 0.1),
            term: ControlRange::new(1, 40, 4, 1.0),
        }
    }
}

impl ControlConfig {
    pub fn range(&self, control: ControlId) -> &ControlRange {
        match control {
            ControlId::Principal => &self.principal,
            ControlId::Rate => &self.rate,
            ControlId::Term => &self.term,
        }
    }

    pub fn range_mut(&mut self, control: ControlId) -> &mut ControlRange {
        match control {
            ControlId::Principal => &mut self.principal,
            ControlId::Rate => &mut self.rate,
            ControlId::Term => &mut self.term,
        }
    }

    /// Reject position ranges that are empty or whose default falls outside,
    /// and scales that would map positions to negative parameters
    pub fn validate(&self) -> Result<()> {
        for control in ControlId::ALL {
            let range = self.range(control);
            if range.min > range.max {
                return Err(AmortizationError::invalid("min", range.min, "control min exceeds max"));
            }
            if !range.contains(range.default) {
                return Err(AmortizationError::invalid(
                    "default",
                    range.default,
                    "control default outside min..=max",
                ));
            }
            if !range.scale.is_finite() || range.scale <= 0.0 {
                return Err(AmortizationError::invalid("scale", range.scale, "control scale must be positive"));
            }
            if range.min < 0 {
                return Err(AmortizationError::invalid("min", range.min, "control positions must be non-negative"));
            }
        }
        Ok(())
    }

    /// Check a raw position against its control's range
    pub fn check_position(&self, control: ControlId, position: i64) -> Result<()> {
        let range = self.range(control);
        if range.contains(position) {
            Ok(())
        } else {
            Err(AmortizationError::PositionOutOfRange {
                control: control.as_str(),
                position,
                min: range.min,
                max: range.max,
            })
        }
    }

    /// Write the value for `position` into the named field of `params`.
    /// Term positions map to whole years.
    pub fn apply(&self, params: &mut LoanParameters, control: ControlId, position: i64) {
        let value = self.range(control).value_at(position);
        match control {
            ControlId::Principal => params.principal = value,
            ControlId::Rate => params.annual_rate_percent = value,
            ControlId::Term => params.term_years = value.round() as u32,
        }
    }

    /// Parameters at every control's default position
    pub fn default_parameters(&self) -> LoanParameters {
        let mut params = LoanParameters::new(0.0, 0.0, 0);
        for control in ControlId::ALL {
            self.apply(&mut params, control, self.range(control).default);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_parameters() {
        let params = ControlConfig::default().default_parameters();
        assert_eq!(params.principal, 30_000.0);
        assert_relative_eq!(params.annual_rate_percent, 3.0, max_relative = 1e-12);
        assert_eq!(params.term_years, 4);
        assert_eq!(params.term_months(), 48);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ControlConfig::default().validate().is_ok());
    }

    #[test]
    fn test_check_position() {
        let config = ControlConfig::default();
        assert!(config.check_position(ControlId::Term, 1).is_ok());
        assert!(config.check_position(ControlId::Term, 40).is_ok());
        assert!(matches!(
            config.check_position(ControlId::Term, 41),
            Err(AmortizationError::PositionOutOfRange { control: "Term", max: 40, .. })
        ));
        assert!(config.check_position(ControlId::Principal, 0).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = ControlConfig::default();
        config.rate.default = 101;
        assert!(config.validate().is_err());

        let mut config = ControlConfig::default();
        config.term.scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = ControlConfig::default();
        config.principal.min = 200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_rate_scale() {
        let config = ControlConfig::default();
        let mut params = config.default_parameters();
        config.apply(&mut params, ControlId::Rate, 65);
        assert_relative_eq!(params.annual_rate_percent, 6.5, max_relative = 1e-12);
        assert_eq!(params.principal, 30_000.0);
    }
}
