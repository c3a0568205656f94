//! Error types for the core module.

use thiserror::Error;

/// Errors from parsing or interpreting rights primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A member role string did not name a known role.
    #[error("unknown member role: {0}")]
    UnknownRole(String),

    /// A moderator action string was empty.
    #[error("empty moderator action")]
    EmptyModeratorAction,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
