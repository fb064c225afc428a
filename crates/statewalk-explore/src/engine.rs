use serde::{Deserialize, Serialize};
use statewalk_model::{ModelError, StateMachine};

use crate::coverage::{state_coverage, transition_coverage, CoverageError};
use crate::strategy::{ChoiceSource, PseudoRandomChoice};
use crate::walk::{Termination, Walk, WalkRecorder};

/// Steps taken by a walk unless the caller says otherwise.
pub const DEFAULT_STEP_LIMIT: usize = 20;

/// Walks shorter than this are rejected outright.
const MIN_STEP_LIMIT: usize = 3;

/// Configuration for a single random walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Maximum number of steps (must be greater than 2).
    pub step_limit: usize,
    /// RNG seed for reproducibility. None = seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            seed: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("Start state '{state}' is not in the states store")]
    MissingStartState { state: String },

    #[error("Start state '{state}' appears {count} times in the states store")]
    DuplicateStartState { state: String, count: usize },

    #[error("Step limit {limit} is too low, it must be greater than 2")]
    StepLimitTooLow { limit: usize },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Coverage error: {0}")]
    Coverage(#[from] CoverageError),
}

/// The random-walk generator.
///
/// At each step it offers the current state's outgoing transitions, drops
/// those whose guard currently fails, and lets the choice source pick one
/// of the rest. The walk ends at the step limit, at a dead end, or when
/// every outgoing transition is blocked by its guard.
pub struct WalkEngine<'a, C, S: ChoiceSource + ?Sized> {
    machine: &'a mut StateMachine<C>,
    chooser: &'a mut S,
}

impl<'a, C, S: ChoiceSource + ?Sized> WalkEngine<'a, C, S> {
    pub fn new(machine: &'a mut StateMachine<C>, chooser: &'a mut S) -> Self {
        Self { machine, chooser }
    }

    /// Generate one walk from `start_state`, taking at most `step_limit` steps.
    ///
    /// `ctx` is handed to every action callback and guard predicate, so
    /// guards see whatever the previous action left behind.
    pub fn random_walk(
        &mut self,
        start_state: &str,
        step_limit: usize,
        ctx: &mut C,
    ) -> Result<Walk, WalkError> {
        self.check_start_state(start_state)?;
        if step_limit < MIN_STEP_LIMIT {
            return Err(WalkError::StepLimitTooLow { limit: step_limit });
        }

        self.machine.set_state(start_state)?;
        let mut recorder = WalkRecorder::new(start_state);

        let termination = loop {
            if recorder.len() >= step_limit {
                break Termination::StepLimit;
            }

            let current = recorder.current().to_string();
            let (index, step) = {
                let candidates = self.machine.transitions_from(&current)?;
                if candidates.is_empty() {
                    break Termination::DeadEnd;
                }

                // Guards are evaluated fresh on every step.
                let usable: Vec<usize> = candidates
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| self.machine.is_usable(t.action(), &*ctx))
                    .map(|(i, _)| i)
                    .collect();
                if usable.is_empty() {
                    break Termination::GuardsBlocked;
                }

                let pick = self.chooser.choose(usable.len()) % usable.len();
                let index = usable[pick];
                (index, candidates[index].clone())
            };

            self.machine.take_transition(index, ctx)?;
            tracing::trace!(step = recorder.len(), %step, "walk step");
            recorder.push(step);
        };

        let state_cov = state_coverage(recorder.steps(), self.machine.states_store())?;
        let transition_cov = transition_coverage(recorder.steps(), self.machine.adjacency())?;
        let walk = recorder.finish(termination, state_cov, transition_cov);

        tracing::debug!(
            start = walk.start_state(),
            end = walk.end_state(),
            steps = walk.len(),
            ?termination,
            chooser = self.chooser.name(),
            state_coverage = walk.state_coverage(),
            transition_coverage = walk.transition_coverage(),
            "walk complete"
        );
        Ok(walk)
    }

    /// The start state must appear exactly once in the states store.
    fn check_start_state(&self, start_state: &str) -> Result<(), WalkError> {
        let count = self
            .machine
            .states_store()
            .iter()
            .filter(|s| *s == start_state)
            .count();
        match count {
            0 => Err(WalkError::MissingStartState {
                state: start_state.to_string(),
            }),
            1 => Ok(()),
            count => Err(WalkError::DuplicateStartState {
                state: start_state.to_string(),
                count,
            }),
        }
    }
}

/// Run one walk with a ChaCha8 choice source built from `config`.
pub fn random_walk<C>(
    machine: &mut StateMachine<C>,
    start_state: &str,
    ctx: &mut C,
    config: &WalkConfig,
) -> Result<Walk, WalkError> {
    let mut chooser = match config.seed {
        Some(seed) => PseudoRandomChoice::seeded(seed),
        None => PseudoRandomChoice::from_entropy(),
    };
    WalkEngine::new(machine, &mut chooser).random_walk(start_state, config.step_limit, ctx)
}
