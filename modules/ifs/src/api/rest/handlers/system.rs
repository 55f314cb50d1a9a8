use axum::{response::Json, Extension};
use std::sync::Arc;

use auth::AuthUser;

use crate::api::rest::dto::{ExportDto, GuidanceDto, StatsDto, SystemDto, UpdateSystemReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// The caller's system, created on first access.
pub async fn get_system(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SystemDto>, ApiError> {
    let overview = svc.get_or_create_system(user_id).await?;
    Ok(Json(overview.into()))
}

/// Change the abstraction level; returns the updated system.
pub async fn update_system(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateSystemReq>,
) -> Result<Json<SystemDto>, ApiError> {
    let overview = svc
        .set_abstraction_level(user_id, &req.abstraction_level)
        .await?;
    Ok(Json(overview.into()))
}

/// Reset the system to a lone Self part.
pub async fn reset_system(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SystemDto>, ApiError> {
    let overview = svc.reset_system(user_id).await?;
    Ok(Json(overview.into()))
}

/// Entity counts and metadata.
pub async fn system_stats(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StatsDto>, ApiError> {
    let stats = svc.system_stats(user_id).await?;
    Ok(Json(stats.into()))
}

/// Full export, journals included.
pub async fn export_system(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ExportDto>, ApiError> {
    let export = svc.export_system(user_id).await?;
    Ok(Json(export.into()))
}

/// Form copy worded for the system's abstraction level.
pub async fn guidance(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GuidanceDto>, ApiError> {
    let (level, fields) = svc.guidance(user_id).await?;
    Ok(Json(GuidanceDto {
        abstraction_level: level.as_str().to_string(),
        fields: fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }))
}
