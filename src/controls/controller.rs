//! Parameter controller: live mirroring vs. commit-and-recompute

use std::sync::Arc;

use super::{ControlConfig, ControlEvent, ControlId, ControlState, ScheduleSink};
use crate::error::Result;
use crate::loan::LoanParameters;
use crate::schedule::{AmortizationEngine, AmortizationResult};

/// Holds the current parameters and the most recently committed schedule.
///
/// All mutation goes through `&mut self`, so callers sharing a controller must
/// wrap it in a lock; that keeps the replace of `current` atomic to readers.
///
/// # Example
/// ```ignore
/// let mut controller = ParameterController::setup(ControlConfig::default())?;
/// controller.report_live_change(ControlId::Term, 5)?;   // label only
/// let published = controller.commit()?;                  // 60-row schedule
/// ```
#[derive(Debug, Clone)]
pub struct ParameterController {
    engine: AmortizationEngine,
    config: ControlConfig,
    parameters: LoanParameters,
    positions: [i64; 3],
    drag: [ControlState; 3],
    current: Option<Arc<AmortizationResult>>,
}

impl ParameterController {
    /// Controller at the default positions, nothing committed yet
    pub fn new(config: ControlConfig) -> Result<Self> {
        Self::with_engine(config, AmortizationEngine::default())
    }

    /// Controller using a pre-built engine
    pub fn with_engine(config: ControlConfig, engine: AmortizationEngine) -> Result<Self> {
        config.validate()?;
        let positions = ControlId::ALL.map(|c| config.range(c).default);
        Ok(Self {
            engine,
            parameters: config.default_parameters(),
            config,
            positions,
            drag: [ControlState::Idle; 3],
            current: None,
        })
    }

    /// Controller at the default positions with the initial schedule committed
    pub fn setup(config: ControlConfig) -> Result<Self> {
        let mut controller = Self::new(config)?;
        controller.commit()?;
        Ok(controller)
    }

    /// Mirror a raw slider position into the named parameter without
    /// recomputing. The committed result is never touched.
    pub fn report_live_change(&mut self, control: ControlId, raw_position: i64) -> Result<()> {
        self.config.check_position(control, raw_position)?;

        self.config.apply(&mut self.parameters, control, raw_position);
        self.positions[control.index()] = raw_position;
        self.drag[control.index()] = ControlState::Dragging;
        Ok(())
    }

    /// `report_live_change` addressed by control name
    pub fn report_live_change_named(&mut self, name: &str, raw_position: i64) -> Result<()> {
        let control = Self::resolve(name)?;
        self.report_live_change(control, raw_position)
    }

    /// Recompute from the current parameters and replace the committed result.
    /// On failure the previous result stays in place.
    pub fn commit(&mut self) -> Result<Arc<AmortizationResult>> {
        self.drag = [ControlState::Idle; 3];

        let result = Arc::new(self.engine.compute_params(&self.parameters)?);
        log::info!(
            "committed schedule: {} months, payment {:.2}",
            result.term_months,
            result.monthly_payment
        );

        self.current = Some(Arc::clone(&result));
        Ok(result)
    }

    /// Control released: mirror the final position, then commit
    pub fn release(&mut self, control: ControlId, raw_position: i64) -> Result<Arc<AmortizationResult>> {
        self.report_live_change(control, raw_position)?;
        self.commit()
    }

    /// `release` addressed by control name
    pub fn release_named(&mut self, name: &str, raw_position: i64) -> Result<Arc<AmortizationResult>> {
        let control = Self::resolve(name)?;
        self.release(control, raw_position)
    }

    /// Dispatch a collaborator event and forward the output to `sink`
    pub fn handle_event<S: ScheduleSink + ?Sized>(&mut self, event: ControlEvent, sink: &mut S) -> Result<()> {
        match event {
            ControlEvent::Adjusting { control, position } => {
                self.report_live_change(control, position)?;
                sink.on_live_change(control, &self.parameters);
            }
            ControlEvent::Released { control, position } => {
                self.report_live_change(control, position)?;
                sink.on_live_change(control, &self.parameters);
                let result = self.commit()?;
                sink.on_commit(&result);
            }
        }
        Ok(())
    }

    fn resolve(name: &str) -> Result<ControlId> {
        name.parse().inspect_err(|_| log::warn!("ignoring event from unknown control '{}'", name))
    }

    /// Current (possibly uncommitted) parameters
    pub fn parameters(&self) -> &LoanParameters {
        &self.parameters
    }

    /// Most recently committed result, if any
    pub fn current_result(&self) -> Option<Arc<AmortizationResult>> {
        self.current.clone()
    }

    pub fn position(&self, control: ControlId) -> i64 {
        self.positions[control.index()]
    }

    pub fn drag_state(&self, control: ControlId) -> ControlState {
        self.drag[control.index()]
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmortizationError;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[derive(Default)]
    struct RecordingSink {
        labels: Vec<(ControlId, LoanParameters)>,
        commits: Vec<AmortizationResult>,
    }

    impl ScheduleSink for RecordingSink {
        fn on_live_change(&mut self, control: ControlId, parameters: &LoanParameters) {
            self.labels.push((control, *parameters));
        }

        fn on_commit(&mut self, result: &AmortizationResult) {
            self.commits.push(result.clone());
        }
    }

    fn controller() -> ParameterController {
        ParameterController::new(ControlConfig::default()).unwrap()
    }

    #[test]
    fn test_new_starts_at_defaults_without_result() {
        let c = controller();
        assert_eq!(c.parameters().principal, 30_000.0);
        assert_eq!(c.parameters().term_years, 4);
        assert_eq!(c.position(ControlId::Rate), 30);
        assert!(c.current_result().is_none());
    }

    #[test]
    fn test_setup_commits_initial_schedule() {
        let c = ParameterController::setup(ControlConfig::default()).unwrap();
        let result = c.current_result().unwrap();
        assert_eq!(result.schedule.len(), 48);
        assert_relative_eq!(result.parameters.annual_rate_percent, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_live_term_change_mirrors_without_recompute() {
        let mut c = ParameterController::setup(ControlConfig::default()).unwrap();
        c.report_live_change(ControlId::Term, 10).unwrap();
        c.report_live_change(ControlId::Term, 4).unwrap();

        assert_eq!(c.parameters().term_years, 4);
        assert_eq!(c.parameters().term_months(), 48);
        assert_eq!(c.drag_state(ControlId::Term), ControlState::Dragging);

        let result = c.commit().unwrap();
        assert_eq!(result.schedule.len(), 48);
        assert_eq!(c.drag_state(ControlId::Term), ControlState::Idle);
    }

    #[test]
    fn test_live_change_leaves_committed_result() {
        let mut c = ParameterController::setup(ControlConfig::default()).unwrap();
        let before = c.current_result().unwrap();

        c.report_live_change(ControlId::Principal, 50).unwrap();
        c.report_live_change(ControlId::Term, 30).unwrap();

        let after = c.current_result().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.parameters.principal, 30_000.0);
        assert_eq!(c.parameters().principal, 500_000.0);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut c = controller();
        c.report_live_change(ControlId::Rate, 60).unwrap();
        let first = c.commit().unwrap();
        let second = c.commit().unwrap();
        assert_eq!(*first, *second);
        assert_eq!(first.monthly_payment.to_bits(), second.monthly_payment.to_bits());
    }

    #[test]
    fn test_unknown_control_name_does_not_mutate() {
        let mut c = ParameterController::setup(ControlConfig::default()).unwrap();
        let params = *c.parameters();

        let err = c.report_live_change_named("ScrollBar_7", 5).unwrap_err();
        assert_eq!(err, AmortizationError::UnrecognizedControl("ScrollBar_7".to_string()));
        assert!(c.release_named("balloon", 5).is_err());
        assert_eq!(*c.parameters(), params);
    }

    #[test]
    fn test_out_of_range_position_does_not_mutate() {
        let mut c = controller();
        let err = c.report_live_change(ControlId::Term, 0).unwrap_err();
        assert!(matches!(err, AmortizationError::PositionOutOfRange { .. }));
        assert_eq!(c.parameters().term_years, 4);
        assert_eq!(c.position(ControlId::Term), 4);
        assert_eq!(c.drag_state(ControlId::Term), ControlState::Idle);
    }

    #[test]
    fn test_failed_commit_keeps_previous_result() {
        // A range that reaches term 0 lets an invalid term through to the engine
        let mut config = ControlConfig::default();
        config.term.min = 0;
        let mut c = ParameterController::setup(config).unwrap();
        let before = c.current_result().unwrap();

        let err = c.release(ControlId::Term, 0).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidParameter { field: "term_years", .. }));
        assert!(Arc::ptr_eq(&before, &c.current_result().unwrap()));
    }

    #[test]
    fn test_release_named_uses_widget_names() {
        let mut c = controller();
        let result = c.release_named("ScrollBar_2", 30).unwrap();
        assert_eq!(result.term_months, 360);
        assert_eq!(result.plot_range(), (1, 360));
    }

    #[test]
    fn test_handle_event_drag_then_release() {
        let mut c = controller();
        let mut sink = RecordingSink::default();

        for position in [5, 6, 7] {
            c.handle_event(ControlEvent::Adjusting { control: ControlId::Principal, position }, &mut sink)
                .unwrap();
        }
        assert!(sink.commits.is_empty());
        assert!(c.current_result().is_none());

        c.handle_event(ControlEvent::Released { control: ControlId::Principal, position: 8 }, &mut sink)
            .unwrap();

        assert_eq!(sink.labels.len(), 4);
        assert_eq!(sink.labels[2].1.principal, 70_000.0);
        assert_eq!(sink.commits.len(), 1);
        assert_eq!(sink.commits[0].parameters.principal, 80_000.0);
        assert_eq!(c.drag_state(ControlId::Principal), ControlState::Idle);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_live_changes_never_touch_committed_result(
            moves in proptest::collection::vec((0usize..3, 1i64..41), 0..20)
        ) {
            let mut c = ParameterController::setup(ControlConfig::default()).unwrap();
            let committed = c.current_result().unwrap();

            for (idx, position) in moves {
                c.report_live_change(ControlId::ALL[idx], position).unwrap();
            }

            prop_assert!(Arc::ptr_eq(&committed, &c.current_result().unwrap()));
        }
    }
}
