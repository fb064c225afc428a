pub mod coverage;
pub mod driver;
pub mod engine;
pub mod rng;
pub mod strategy;
pub mod walk;

pub use coverage::{CoverageError, CoverageTracker};
pub use driver::{DriverError, MethodTableDriver, SutDriver};
pub use engine::{random_walk, WalkConfig, WalkEngine, WalkError};
pub use strategy::{ChoiceSource, PseudoRandomChoice, ScriptedChoice};
pub use walk::{Termination, Walk};
