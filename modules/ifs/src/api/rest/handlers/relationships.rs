use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;
use uuid::Uuid;

use auth::AuthUser;

use crate::api::rest::dto::{CreateRelationshipReq, RelationshipDto, UpdateRelationshipReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Create a relationship between two parts of the caller's system.
pub async fn create_relationship(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateRelationshipReq>,
) -> Result<(StatusCode, Json<RelationshipDto>), ApiError> {
    let rel = svc.create_relationship(user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(rel.into())))
}

/// All relationships of the caller's system.
pub async fn list_relationships(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RelationshipDto>>, ApiError> {
    let rels = svc.list_relationships(user_id).await?;
    Ok(Json(rels.into_iter().map(RelationshipDto::from).collect()))
}

/// One relationship by id.
pub async fn get_relationship(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(relationship_id): Path<Uuid>,
) -> Result<Json<RelationshipDto>, ApiError> {
    let rel = svc.get_relationship(user_id, relationship_id).await?;
    Ok(Json(rel.into()))
}

/// Partial update of a relationship (type and description only).
pub async fn update_relationship(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(relationship_id): Path<Uuid>,
    Json(req): Json<UpdateRelationshipReq>,
) -> Result<Json<RelationshipDto>, ApiError> {
    let rel = svc
        .update_relationship(user_id, relationship_id, req.into())
        .await?;
    Ok(Json(rel.into()))
}

/// Delete a relationship.
pub async fn delete_relationship(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(relationship_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    svc.delete_relationship(user_id, relationship_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
