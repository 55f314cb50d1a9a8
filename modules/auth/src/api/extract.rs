//! Bearer-token extractor for protected routes.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::token::TokenKeys;

/// The authenticated caller, resolved from `Authorization: Bearer …`.
///
/// Handlers take this as an argument; everything downstream of it may treat
/// the inner id as trusted and unforgeable.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Extract the bearer token from an Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// 401 rejection with the uniform `{"error": …}` body.
#[derive(Debug)]
pub struct AuthRejection(&'static str);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": self.0 }))).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let keys = parts
            .extensions
            .get::<Arc<TokenKeys>>()
            .ok_or(AuthRejection("Authentication is not configured"))?;

        let token = extract_bearer_token(&parts.headers)
            .ok_or(AuthRejection("Missing authorization header"))?;

        let claims = keys
            .validate(token)
            .map_err(|_| AuthRejection("Invalid or expired token"))?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_bearer_token(&headers), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
