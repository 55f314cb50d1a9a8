use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::error::DomainError;

/// REST-boundary error: status plus the uniform `{"error": …}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let status = match &e {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::SystemNotFound
            | DomainError::PartNotFound { .. }
            | DomainError::RelationshipNotFound { .. }
            | DomainError::JournalNotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::SelfPartProtected | DomainError::DuplicateSelfPart => {
                StatusCode::CONFLICT
            }
            DomainError::Database { .. } => {
                // Log internals, never leak them to the client.
                error!(error = %e, "Internal error in parts-map API");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "An internal error occurred".to_string(),
                };
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
