use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::error::AuthError;

/// REST-boundary error: status plus the uniform `{"error": …}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::Validation { .. } => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::UsernameTaken { .. } | AuthError::EmailTaken { .. } => StatusCode::CONFLICT,
            AuthError::Database { .. } | AuthError::Internal { .. } => {
                // Log internals, never leak them to the client.
                error!(error = %e, "Internal error in auth API");
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
