use std::fmt;

use statewalk_ir::{ActionName, State, TransitionRecord};

use crate::adjacency::AdjacencyModel;
use crate::error::ModelError;
use crate::registry::{ActionRegistry, GuardRegistry};

/// A runnable model: adjacency plus the action and guard registries, and a
/// single current state.
///
/// Actions are dispatched by name through [`StateMachine::call_action`].
/// Direct dispatch never consults guards; only walks do.
pub struct StateMachine<C = ()> {
    adjacency: AdjacencyModel,
    states_store: Vec<State>,
    actions: ActionRegistry<C>,
    guards: GuardRegistry<C>,
    state: Option<State>,
}

impl<C> StateMachine<C> {
    pub fn new(
        adjacency: AdjacencyModel,
        actions: ActionRegistry<C>,
        guards: GuardRegistry<C>,
    ) -> Self {
        let states_store = adjacency.states().to_vec();
        Self {
            adjacency,
            states_store,
            actions,
            guards,
            state: None,
        }
    }

    pub fn adjacency(&self) -> &AdjacencyModel {
        &self.adjacency
    }

    /// De-duplicated states discovered while building the model.
    pub fn states_store(&self) -> &[State] {
        &self.states_store
    }

    /// Replace the states store. Walks validate their start state against it.
    pub fn set_states_store(&mut self, states: Vec<State>) {
        self.states_store = states;
    }

    pub fn actions(&self) -> &[ActionName] {
        self.actions.names()
    }

    pub fn guarded_actions(&self) -> &[ActionName] {
        self.guards.guarded_actions()
    }

    pub fn is_guarded(&self, action: &str) -> bool {
        self.guards.is_guarded(action)
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn set_state(&mut self, state: &str) -> Result<(), ModelError> {
        if !self.adjacency.contains_state(state) {
            return Err(ModelError::UnknownState {
                state: state.to_string(),
            });
        }
        self.state = Some(state.to_string());
        Ok(())
    }

    /// Outgoing transitions of `state`, in adjacency order.
    pub fn transitions_from(&self, state: &str) -> Result<&[TransitionRecord], ModelError> {
        self.adjacency
            .outgoing(state)
            .ok_or_else(|| ModelError::UnknownState {
                state: state.to_string(),
            })
    }

    /// Action names offered from `state`, in adjacency order.
    pub fn actions_for_state(&self, state: &str) -> Result<Vec<&str>, ModelError> {
        Ok(self
            .transitions_from(state)?
            .iter()
            .map(TransitionRecord::action)
            .collect())
    }

    /// All transitions leaving non-dead-end states.
    pub fn valid_transitions(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.adjacency.valid_transitions()
    }

    /// Evaluate the guard on `action` without touching state.
    /// `None` when the action carries no guard.
    pub fn guard_on(&self, action: &str, ctx: &C) -> Option<bool> {
        self.guards.evaluate(action, ctx)
    }

    /// Whether a walk may choose `action` right now.
    pub fn is_usable(&self, action: &str, ctx: &C) -> bool {
        self.guards.allows(action, ctx)
    }

    /// Fire `action` from the current state and return the new state.
    ///
    /// The first outgoing transition carrying `action` decides the
    /// destination. Guards are not consulted.
    pub fn call_action(&mut self, action: &str, ctx: &mut C) -> Result<State, ModelError> {
        if !self.actions.contains(action) {
            return Err(ModelError::UnknownAction {
                action: action.to_string(),
            });
        }
        let current = self.state.as_deref().ok_or(ModelError::NoCurrentState)?;
        let index = self
            .transitions_from(current)?
            .iter()
            .position(|t| t.action() == action)
            .ok_or_else(|| ModelError::ActionNotAvailable {
                action: action.to_string(),
                state: current.to_string(),
            })?;
        self.take_transition(index, ctx)
    }

    /// Fire the `index`-th outgoing transition of the current state: run the
    /// action's callback, then move to the transition's end state.
    pub fn take_transition(&mut self, index: usize, ctx: &mut C) -> Result<State, ModelError> {
        let current = self.state.as_deref().ok_or(ModelError::NoCurrentState)?;
        let transition = self
            .transitions_from(current)?
            .get(index)
            .cloned()
            .ok_or_else(|| ModelError::NoSuchTransition {
                state: current.to_string(),
                index,
            })?;

        tracing::debug!(%transition, "execute action");
        self.actions.invoke(transition.action(), ctx)?;
        self.state = Some(transition.end().to_string());
        Ok(transition.end().to_string())
    }
}

impl<C> fmt::Display for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "States, and their Actions:")?;
        for (state, edges) in self.adjacency.iter() {
            write!(f, "\nState: {state}\nActions:\n")?;
            if edges.is_empty() {
                writeln!(f, "\t<No Actions>")?;
            }
            for edge in edges {
                writeln!(f, "\t{}", edge.action())?;
            }
        }
        Ok(())
    }
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("adjacency", &self.adjacency)
            .field("states_store", &self.states_store)
            .field("actions", &self.actions)
            .field("guards", &self.guards)
            .field("state", &self.state)
            .finish()
    }
}
