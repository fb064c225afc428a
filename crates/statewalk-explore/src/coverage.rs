//! Walk coverage metrics.
//!
//! Two plain ratios scaled to 0..=100:
//! - **state**: distinct states touched by the walk over the states store.
//! - **transition**: distinct transitions taken over all valid transitions.
//!
//! Guards blocking an edge earn no partial credit.

use std::collections::HashSet;

use serde::Serialize;
use statewalk_ir::{State, TransitionRecord};
use statewalk_model::AdjacencyModel;

#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("Model has no valid transitions to cover")]
    NoValidTransitions,

    #[error("States store is empty")]
    EmptyStatesStore,
}

/// Every transition leaving a state that has at least one outgoing edge.
/// Dead-end states contribute nothing.
pub fn valid_transitions(model: &AdjacencyModel) -> Vec<&TransitionRecord> {
    model.valid_transitions().collect()
}

/// Percentage of `states_store` touched, as start or end, by `steps`.
/// Zero for a walk with no steps.
pub fn state_coverage(
    steps: &[TransitionRecord],
    states_store: &[State],
) -> Result<f64, CoverageError> {
    if steps.is_empty() {
        return Ok(0.0);
    }
    let store: HashSet<&str> = states_store.iter().map(String::as_str).collect();
    if store.is_empty() {
        return Err(CoverageError::EmptyStatesStore);
    }
    let touched = steps
        .iter()
        .flat_map(|t| [t.start(), t.end()])
        .filter(|s| store.contains(s))
        .collect::<HashSet<_>>()
        .len();
    Ok(percentage(touched, store.len()))
}

/// Percentage of the model's valid transitions that `steps` took at least once.
pub fn transition_coverage(
    steps: &[TransitionRecord],
    model: &AdjacencyModel,
) -> Result<f64, CoverageError> {
    let universe: HashSet<&TransitionRecord> = model.valid_transitions().collect();
    if universe.is_empty() {
        return Err(CoverageError::NoValidTransitions);
    }
    let taken = steps
        .iter()
        .filter(|t| universe.contains(t))
        .collect::<HashSet<_>>()
        .len();
    Ok(percentage(taken, universe.len()))
}

fn percentage(hit: usize, total: usize) -> f64 {
    hit as f64 / total as f64 * 100.0
}

/// Combined coverage across several walks over the same model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageTracker {
    states: HashSet<State>,
    transitions: HashSet<TransitionRecord>,
}

impl CoverageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one walk's steps into the running totals.
    pub fn record(&mut self, steps: &[TransitionRecord]) {
        for step in steps {
            self.states.insert(step.start().to_string());
            self.states.insert(step.end().to_string());
            self.transitions.insert(step.clone());
        }
    }

    pub fn unique_states(&self) -> usize {
        self.states.len()
    }

    pub fn unique_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub fn state_coverage(&self, states_store: &[State]) -> Result<f64, CoverageError> {
        if self.states.is_empty() {
            return Ok(0.0);
        }
        let store: HashSet<&State> = states_store.iter().collect();
        if store.is_empty() {
            return Err(CoverageError::EmptyStatesStore);
        }
        let touched = self.states.iter().filter(|s| store.contains(s)).count();
        Ok(percentage(touched, store.len()))
    }

    pub fn transition_coverage(&self, model: &AdjacencyModel) -> Result<f64, CoverageError> {
        let universe: HashSet<&TransitionRecord> = model.valid_transitions().collect();
        if universe.is_empty() {
            return Err(CoverageError::NoValidTransitions);
        }
        let taken = self
            .transitions
            .iter()
            .filter(|t| universe.contains(t))
            .count();
        Ok(percentage(taken, universe.len()))
    }
}
