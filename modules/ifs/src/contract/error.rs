use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other modules.
#[derive(Error, Debug, Clone)]
pub enum IfsError {
    #[error("No system exists for this user")]
    SystemNotFound,

    #[error("Not found: {id}")]
    NotFound { id: Uuid },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl IfsError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
