use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a point in the behaviour model. Identity is the whole value.
pub type State = String;

/// Name of an action that moves the model between states.
pub type ActionName = String;

/// One edge of the model: `start --action--> end`.
///
/// Immutable once built. Equality and hashing are over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionRecord {
    start: State,
    action: ActionName,
    end: State,
}

impl TransitionRecord {
    pub fn new(
        start: impl Into<State>,
        action: impl Into<ActionName>,
        end: impl Into<State>,
    ) -> Self {
        Self {
            start: start.into(),
            action: action.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

impl fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} => {}", self.start, self.action, self.end)
    }
}
