use std::collections::{HashMap, HashSet};

use statewalk_ir::{State, TransitionRecord};

/// Map from every known state to its ordered outgoing transitions.
///
/// Every state that appears as the start or end of any record is a key;
/// states without outgoing records map to an empty list (dead ends).
/// Insertion order is kept, both for the states and for each state's edges,
/// since it is the tie-break order for dispatch.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyModel {
    states: Vec<State>,
    outgoing: HashMap<State, Vec<TransitionRecord>>,
}

impl AdjacencyModel {
    /// Build the model from a raw transition list, collapsing exact duplicates.
    pub fn from_transitions(raw: impl IntoIterator<Item = TransitionRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        let mut duplicates = 0usize;
        for transition in raw {
            if seen.insert(transition.clone()) {
                unique.push(transition);
            } else {
                tracing::debug!(%transition, "duplicate transition collapsed");
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            tracing::debug!(duplicates, "probable duplicate entries in transition list");
        }

        let mut model = Self::default();
        for transition in &unique {
            model.add_state(transition.start());
            model.add_state(transition.end());
        }
        for transition in unique {
            if let Some(edges) = model.outgoing.get_mut(transition.start()) {
                edges.push(transition);
            }
        }
        model
    }

    fn add_state(&mut self, state: &str) {
        if !self.outgoing.contains_key(state) {
            self.states.push(state.to_string());
            self.outgoing.insert(state.to_string(), Vec::new());
        }
    }

    /// Every distinct state, in first-seen order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.outgoing.contains_key(state)
    }

    /// Outgoing transitions of `state`, or `None` if the state is unknown.
    pub fn outgoing(&self, state: &str) -> Option<&[TransitionRecord]> {
        self.outgoing.get(state).map(Vec::as_slice)
    }

    pub fn is_dead_end(&self, state: &str) -> bool {
        self.outgoing(state).is_some_and(<[_]>::is_empty)
    }

    /// `(state, outgoing)` pairs in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TransitionRecord])> {
        self.states.iter().map(|state| {
            let edges = self.outgoing.get(state).map(Vec::as_slice).unwrap_or(&[]);
            (state.as_str(), edges)
        })
    }

    /// All transitions leaving states that have at least one outgoing edge.
    pub fn valid_transitions(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.iter()
            .filter(|(_, edges)| !edges.is_empty())
            .flat_map(|(_, edges)| edges.iter())
    }

    pub fn transition_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
