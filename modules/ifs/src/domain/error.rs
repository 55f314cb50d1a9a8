use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror.
///
/// The REST layer maps these onto the fixed taxonomy: validation → 400,
/// not-found (including unowned resources) → 404, conflicts → 409.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No system exists for this user")]
    SystemNotFound,

    #[error("Part not found: {id}")]
    PartNotFound { id: Uuid },

    #[error("Relationship not found: {id}")]
    RelationshipNotFound { id: Uuid },

    #[error("Journal entry not found: {id}")]
    JournalNotFound { id: Uuid },

    #[error("The Self part cannot be deleted or demoted")]
    SelfPartProtected,

    #[error("A system can only contain one Self part")]
    DuplicateSelfPart,

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn part_not_found(id: Uuid) -> Self {
        Self::PartNotFound { id }
    }

    pub fn relationship_not_found(id: Uuid) -> Self {
        Self::RelationshipNotFound { id }
    }

    pub fn journal_not_found(id: Uuid) -> Self {
        Self::JournalNotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}

impl From<sea_orm::TransactionError<DomainError>> for DomainError {
    fn from(e: sea_orm::TransactionError<DomainError>) -> Self {
        match e {
            sea_orm::TransactionError::Connection(db) => db.into(),
            sea_orm::TransactionError::Transaction(err) => err,
        }
    }
}
