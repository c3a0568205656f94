//! Error types for rights sessions.

use exploration_rights_sync::RightsError;
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A rights write failed.
    #[error("rights error: {0}")]
    Rights(#[from] RightsError),

    /// Page data handed to the session could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
