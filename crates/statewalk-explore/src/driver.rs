//! The contract between a walk and the system under test.
//!
//! A driver answers to `test_<STATE>` for every state it can verify and to
//! `<action>` for every action it can perform. The walk only decides the
//! order of calls; the driver does the real work.

use std::collections::HashMap;
use std::fmt;

const STATE_CHECK_PREFIX: &str = "test_";

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Not a SUT driver: {reason}")]
    InvalidDriver { reason: String },

    #[error("Driver has no method '{method}'")]
    MissingMethod { method: String },

    #[error("Driver method '{method}' failed: {message}")]
    Failed { method: String, message: String },
}

/// Name of the driver method that verifies `state` was reached.
pub fn state_check_method(state: &str) -> String {
    format!("{STATE_CHECK_PREFIX}{state}")
}

/// A system-under-test driver, addressed by method name.
pub trait SutDriver {
    /// Every method name this driver answers to.
    fn method_names(&self) -> Vec<String>;

    /// Call `method`. An `Err` carries the failure message.
    fn invoke(&mut self, method: &str) -> Result<(), String>;
}

// Plain data has no method surface; driving it is always rejected.
impl SutDriver for String {
    fn method_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn invoke(&mut self, method: &str) -> Result<(), String> {
        Err(format!("a string cannot perform '{method}'"))
    }
}

impl<T> SutDriver for Vec<T> {
    fn method_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn invoke(&mut self, method: &str) -> Result<(), String> {
        Err(format!("an array cannot perform '{method}'"))
    }
}

type DriverMethod<S> = Box<dyn FnMut(&mut S) -> Result<(), String>>;

/// Driver built from named closures over a shared state `S`.
pub struct MethodTableDriver<S> {
    state: S,
    methods: HashMap<String, DriverMethod<S>>,
}

impl<S> MethodTableDriver<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            methods: HashMap::new(),
        }
    }

    /// Register `method`, replacing any earlier one with the same name.
    pub fn on<F>(&mut self, method: impl Into<String>, f: F) -> &mut Self
    where
        F: FnMut(&mut S) -> Result<(), String> + 'static,
    {
        self.methods.insert(method.into(), Box::new(f));
        self
    }

    /// Register the verification method for `state`.
    pub fn on_state<F>(&mut self, state: &str, f: F) -> &mut Self
    where
        F: FnMut(&mut S) -> Result<(), String> + 'static,
    {
        self.on(state_check_method(state), f)
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S> SutDriver for MethodTableDriver<S> {
    fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    fn invoke(&mut self, method: &str) -> Result<(), String> {
        match self.methods.get_mut(method) {
            Some(f) => f(&mut self.state),
            None => Err(format!("no method '{method}'")),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for MethodTableDriver<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTableDriver")
            .field("state", &self.state)
            .field("methods", &self.method_names())
            .finish()
    }
}
