//! Per-model registries binding action names to behaviour.
//!
//! Callbacks receive a caller-owned context `C`. Actions may mutate it and
//! guards read it, which is how an action enables or disables another
//! action's guard.

use std::collections::HashMap;
use std::fmt;

use statewalk_ir::ActionName;

use crate::error::ModelError;

/// Side effect run when an action fires.
pub type ActionCallback<C> = Box<dyn FnMut(&mut C)>;

/// Predicate deciding whether a guarded action may be chosen by a walk.
pub type GuardPredicate<C> = Box<dyn Fn(&C) -> bool>;

/// Declared actions, each with an optional callback.
pub struct ActionRegistry<C> {
    names: Vec<ActionName>,
    callbacks: HashMap<ActionName, Option<ActionCallback<C>>>,
}

impl<C> ActionRegistry<C> {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            callbacks: HashMap::new(),
        }
    }

    /// Declare `name`. Redefining an action replaces its callback.
    pub fn define(&mut self, name: impl Into<ActionName>, callback: Option<ActionCallback<C>>) {
        let name = name.into();
        if !self.callbacks.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.callbacks.insert(name, callback);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    pub fn has_callback(&self, name: &str) -> bool {
        matches!(self.callbacks.get(name), Some(Some(_)))
    }

    /// Declared action names in declaration order.
    pub fn names(&self) -> &[ActionName] {
        &self.names
    }

    /// Run the callback for `name`. A plain label action is a no-op.
    pub fn invoke(&mut self, name: &str, ctx: &mut C) -> Result<(), ModelError> {
        match self.callbacks.get_mut(name) {
            Some(Some(callback)) => {
                callback(ctx);
                Ok(())
            }
            Some(None) => Ok(()),
            None => Err(ModelError::UnknownAction {
                action: name.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<C> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ActionRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("names", &self.names)
            .finish()
    }
}

/// Guarded actions and their predicates.
pub struct GuardRegistry<C> {
    guarded: Vec<ActionName>,
    predicates: HashMap<ActionName, GuardPredicate<C>>,
}

impl<C> GuardRegistry<C> {
    pub fn new() -> Self {
        Self {
            guarded: Vec::new(),
            predicates: HashMap::new(),
        }
    }

    /// Guard `action` with `predicate`, replacing any earlier guard.
    pub fn define(&mut self, action: impl Into<ActionName>, predicate: GuardPredicate<C>) {
        let action = action.into();
        if !self.predicates.contains_key(&action) {
            self.guarded.push(action.clone());
        }
        self.predicates.insert(action, predicate);
    }

    pub fn is_guarded(&self, action: &str) -> bool {
        self.predicates.contains_key(action)
    }

    /// Guarded action names in definition order.
    pub fn guarded_actions(&self) -> &[ActionName] {
        &self.guarded
    }

    /// Evaluate the guard on `action`; `None` when it has no guard.
    pub fn evaluate(&self, action: &str, ctx: &C) -> Option<bool> {
        self.predicates.get(action).map(|predicate| predicate(ctx))
    }

    /// True when `action` is unguarded or its guard currently passes.
    pub fn allows(&self, action: &str, ctx: &C) -> bool {
        self.evaluate(action, ctx).unwrap_or(true)
    }
}

impl<C> Default for GuardRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for GuardRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardRegistry")
            .field("guarded", &self.guarded)
            .finish()
    }
}
