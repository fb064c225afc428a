use statewalk_ir::TableError;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Unknown action '{action}': define it before referencing it")]
    UnknownAction { action: String },

    #[error("Action '{action}' is not available from state '{state}'")]
    ActionNotAvailable { action: String, state: String },

    #[error("Unknown state '{state}'")]
    UnknownState { state: String },

    #[error("State '{state}' has no outgoing transition #{index}")]
    NoSuchTransition { state: String, index: usize },

    #[error("State machine has no current state")]
    NoCurrentState,

    #[error("State table error: {0}")]
    Table(#[from] TableError),
}
