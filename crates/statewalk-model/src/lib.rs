pub mod adjacency;
pub mod builder;
pub mod error;
pub mod machine;
pub mod registry;

pub use adjacency::AdjacencyModel;
pub use builder::ModelBuilder;
pub use error::ModelError;
pub use machine::StateMachine;
pub use registry::{ActionRegistry, GuardRegistry};
