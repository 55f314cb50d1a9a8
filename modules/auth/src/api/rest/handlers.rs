use axum::{http::StatusCode, response::Json, Extension};
use std::sync::Arc;

use crate::api::extract::AuthUser;
use crate::api::rest::dto::{LoginReq, RegisterReq, SessionDto, UserDto};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Register a new account.
pub async fn register(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<SessionDto>), ApiError> {
    let (user, access_token) = svc.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionDto {
            user: user.into(),
            access_token,
        }),
    ))
}

/// Exchange credentials for an access token.
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<LoginReq>,
) -> Result<Json<SessionDto>, ApiError> {
    let (user, access_token) = svc.login(req.into()).await?;
    Ok(Json(SessionDto {
        user: user.into(),
        access_token,
    }))
}

/// Profile of the authenticated caller.
pub async fn me(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    let user = svc.current_user(user_id).await?;
    Ok(Json(user.into()))
}
