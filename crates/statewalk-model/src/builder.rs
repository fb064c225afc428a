//! Front door for assembling a runnable model.
//!
//! Either feed it a parsed state table, or declare actions, guards and
//! transitions by hand. Both paths end in [`ModelBuilder::build`].

use std::fmt;
use std::path::Path;

use statewalk_ir::parse::load_table;
use statewalk_ir::{ActionName, State, Table, TransitionRecord};

use crate::adjacency::AdjacencyModel;
use crate::error::ModelError;
use crate::machine::StateMachine;
use crate::registry::{ActionRegistry, GuardRegistry};

pub struct ModelBuilder<C = ()> {
    actions: ActionRegistry<C>,
    guards: GuardRegistry<C>,
    transitions: Vec<TransitionRecord>,
    states: Vec<State>,
}

impl<C> ModelBuilder<C> {
    pub fn new() -> Self {
        Self {
            actions: ActionRegistry::new(),
            guards: GuardRegistry::new(),
            transitions: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Start from a state table. Every action in the table is declared
    /// without a callback; callbacks and guards can still be added before
    /// building.
    pub fn from_table(table: &Table) -> Result<Self, ModelError> {
        let mut builder = Self::new();
        for transition in table.transitions()? {
            if !builder.actions.contains(transition.action()) {
                builder.define_action(transition.action());
            }
            builder.attach_transition(transition.start(), transition.action(), transition.end())?;
        }
        Ok(builder)
    }

    /// Load a comma-separated state table from disk and build it directly.
    pub fn load_table(path: impl AsRef<Path>) -> Result<StateMachine<C>, ModelError> {
        let table = load_table(path)?;
        Ok(Self::from_table(&table)?.build())
    }

    /// Declare a plain action with no side effect.
    pub fn define_action(&mut self, name: impl Into<ActionName>) -> &mut Self {
        let name = name.into();
        tracing::debug!(action = %name, "define action");
        self.actions.define(name, None);
        self
    }

    /// Declare an action that runs `callback` each time it fires.
    pub fn define_action_with<F>(&mut self, name: impl Into<ActionName>, callback: F) -> &mut Self
    where
        F: FnMut(&mut C) + 'static,
    {
        let name = name.into();
        tracing::debug!(action = %name, "define action with callback");
        self.actions.define(name, Some(Box::new(callback)));
        self
    }

    /// Guard an already declared action.
    pub fn define_guard<F>(&mut self, action: &str, predicate: F) -> Result<&mut Self, ModelError>
    where
        F: Fn(&C) -> bool + 'static,
    {
        if !self.actions.contains(action) {
            return Err(ModelError::UnknownAction {
                action: action.to_string(),
            });
        }
        tracing::debug!(action, "define guard");
        self.guards.define(action, Box::new(predicate));
        Ok(self)
    }

    /// Add `start --action--> end`. The action must already be declared.
    pub fn attach_transition(
        &mut self,
        start: impl Into<State>,
        action: &str,
        end: impl Into<State>,
    ) -> Result<&mut Self, ModelError> {
        if !self.actions.contains(action) {
            return Err(ModelError::UnknownAction {
                action: action.to_string(),
            });
        }
        let (start, end) = (start.into(), end.into());
        for state in [&start, &end] {
            if !self.states.contains(state) {
                self.states.push(state.clone());
            }
        }
        self.transitions
            .push(TransitionRecord::new(start, action, end));
        Ok(self)
    }

    /// Declared action names, in declaration order.
    pub fn actions(&self) -> &[ActionName] {
        self.actions.names()
    }

    /// Unique states referenced by attached transitions, in first-seen order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Raw transitions as attached, duplicates included.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Finalize: build the adjacency model and bind the registries to it.
    pub fn build(self) -> StateMachine<C> {
        let adjacency = AdjacencyModel::from_transitions(self.transitions);
        tracing::debug!(
            states = adjacency.len(),
            transitions = adjacency.transition_count(),
            "built state model"
        );
        StateMachine::new(adjacency, self.actions, self.guards)
    }
}

impl<C> Default for ModelBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ModelBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("actions", &self.actions)
            .field("guards", &self.guards)
            .field("transitions", &self.transitions)
            .finish()
    }
}
