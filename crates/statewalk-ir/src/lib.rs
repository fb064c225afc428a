pub mod parse;
pub mod table;
pub mod types;

pub use table::{Layout, Table, TableError};
pub use types::{ActionName, State, TransitionRecord};
