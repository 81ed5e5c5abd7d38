use crate::types::StoryId;

/// Domain-level error type shared across the workspace.
///
/// The API layer maps each variant to an HTTP status code; crates below
/// the API layer never deal in HTTP semantics.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"Story"`.
        entity: &'static str,
        /// The id that was looked up.
        id: StoryId,
    },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (e.g. a render is
    /// already in progress for the story).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
