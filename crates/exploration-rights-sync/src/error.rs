//! Error types for the sync module.

use thiserror::Error;

/// Errors that can occur while writing rights to the authority.
///
/// Every failure leaves the local snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RightsError {
    /// The version token no longer matches the authority's document.
    #[error("stale version: {0}")]
    StaleVersion(String),

    /// The caller lacks permission for the requested change.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request never reached the authority or the response was lost.
    #[error("transport error: {0}")]
    Transport(String),

    /// Any other non-success response from the authority.
    #[error("authority rejected request ({status}): {message}")]
    Authority { status: u16, message: String },

    /// The response did not carry a decodable rights object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The write task ended without reporting an outcome.
    #[error("write abandoned before completion")]
    Abandoned,

    /// The write was requested outside a tokio runtime and never sent.
    #[error("no tokio runtime available to run the write")]
    NoRuntime,
}

impl RightsError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => RightsError::Unauthorized(message),
            409 => RightsError::StaleVersion(message),
            _ => RightsError::Authority { status, message },
        }
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, RightsError>;
