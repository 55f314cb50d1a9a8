use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;
use uuid::Uuid;

use auth::AuthUser;

use crate::api::rest::dto::{CreatePartReq, PartDto, UpdatePartReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Create a part in the caller's system.
pub async fn create_part(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreatePartReq>,
) -> Result<(StatusCode, Json<PartDto>), ApiError> {
    let part = svc.create_part(user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(part.into())))
}

/// All parts of the caller's system.
pub async fn list_parts(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PartDto>>, ApiError> {
    let parts = svc.list_parts(user_id).await?;
    Ok(Json(parts.into_iter().map(PartDto::from).collect()))
}

/// One part by id.
pub async fn get_part(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(part_id): Path<Uuid>,
) -> Result<Json<PartDto>, ApiError> {
    let part = svc.get_part(user_id, part_id).await?;
    Ok(Json(part.into()))
}

/// Partial update of a part.
pub async fn update_part(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(part_id): Path<Uuid>,
    Json(req): Json<UpdatePartReq>,
) -> Result<Json<PartDto>, ApiError> {
    let part = svc.update_part(user_id, part_id, req.into()).await?;
    Ok(Json(part.into()))
}

/// Delete a part (and its relationships).
pub async fn delete_part(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(part_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    svc.delete_part(user_id, part_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
