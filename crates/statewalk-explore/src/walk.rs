use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use statewalk_ir::{State, TransitionRecord};

use crate::driver::{state_check_method, DriverError, SutDriver};

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The step limit was reached.
    StepLimit,
    /// The current state has no outgoing transitions.
    DeadEnd,
    /// Outgoing transitions exist, but every one is guarded and blocked.
    GuardsBlocked,
}

/// One completed traversal: the ordered steps plus its coverage figures.
///
/// Only produced by the walk engine, and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Walk {
    start_state: State,
    end_state: State,
    steps: Vec<TransitionRecord>,
    termination: Termination,
    state_coverage: f64,
    transition_coverage: f64,
}

impl Walk {
    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    pub fn end_state(&self) -> &str {
        &self.end_state
    }

    pub fn steps(&self) -> &[TransitionRecord] {
        &self.steps
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Percentage of the states store touched by this walk.
    pub fn state_coverage(&self) -> f64 {
        self.state_coverage
    }

    /// Percentage of the model's transitions taken by this walk.
    pub fn transition_coverage(&self) -> f64 {
        self.transition_coverage
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_added(&self) -> Option<&TransitionRecord> {
        self.steps.last()
    }

    /// Steps with repeats removed, in first-taken order.
    pub fn transitions_uniq(&self) -> Vec<&TransitionRecord> {
        let mut seen = HashSet::new();
        self.steps.iter().filter(|t| seen.insert(*t)).collect()
    }

    /// The start state followed by each step's end state.
    pub fn visited_states(&self) -> Vec<&str> {
        std::iter::once(self.start_state.as_str())
            .chain(self.steps.iter().map(TransitionRecord::end))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replay this walk against a system-under-test driver.
    ///
    /// Verifies the start state with `test_<state>`, then for each step calls
    /// the action method followed by the destination's `test_<state>`.
    pub fn drive_using<D>(&self, driver: &mut D) -> Result<(), DriverError>
    where
        D: SutDriver + ?Sized,
    {
        let methods = driver.method_names();
        if methods.is_empty() {
            return Err(DriverError::InvalidDriver {
                reason: "driver exposes no methods".to_string(),
            });
        }

        let mut call = |method: String| -> Result<(), DriverError> {
            if !methods.contains(&method) {
                return Err(DriverError::MissingMethod { method });
            }
            tracing::trace!(%method, "drive");
            driver
                .invoke(&method)
                .map_err(|message| DriverError::Failed { method, message })
        };

        call(state_check_method(&self.start_state))?;
        for step in &self.steps {
            call(step.action().to_string())?;
            call(state_check_method(step.end()))?;
        }
        Ok(())
    }
}

impl fmt::Display for Walk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},", self.start_state)?;
        for step in &self.steps {
            write!(f, "{} => {},", step.action(), step.end())?;
        }
        writeln!(f, "{}", self.end_state)
    }
}

/// A walk under construction.
#[derive(Debug)]
pub(crate) struct WalkRecorder {
    start_state: State,
    steps: Vec<TransitionRecord>,
}

impl WalkRecorder {
    pub(crate) fn new(start_state: &str) -> Self {
        Self {
            start_state: start_state.to_string(),
            steps: Vec::new(),
        }
    }

    /// End state of the last step, or the start state before any step.
    pub(crate) fn current(&self) -> &str {
        self.steps
            .last()
            .map(TransitionRecord::end)
            .unwrap_or(self.start_state.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }

    pub(crate) fn steps(&self) -> &[TransitionRecord] {
        &self.steps
    }

    pub(crate) fn push(&mut self, step: TransitionRecord) {
        self.steps.push(step);
    }

    pub(crate) fn finish(
        self,
        termination: Termination,
        state_coverage: f64,
        transition_coverage: f64,
    ) -> Walk {
        let end_state = self.current().to_string();
        Walk {
            start_state: self.start_state,
            end_state,
            steps: self.steps,
            termination,
            state_coverage,
            transition_coverage,
        }
    }
}
