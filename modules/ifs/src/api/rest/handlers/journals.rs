use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;
use uuid::Uuid;

use auth::AuthUser;

use crate::api::rest::dto::{CreateJournalReq, JournalDto, UpdateJournalReq};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Write a journal entry.
pub async fn create_journal(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateJournalReq>,
) -> Result<(StatusCode, Json<JournalDto>), ApiError> {
    let entry = svc.create_journal(user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// All journal entries, newest first.
pub async fn list_journals(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<JournalDto>>, ApiError> {
    let entries = svc.list_journals(user_id).await?;
    Ok(Json(entries.into_iter().map(JournalDto::from).collect()))
}

/// One journal entry by id.
pub async fn get_journal(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(journal_id): Path<Uuid>,
) -> Result<Json<JournalDto>, ApiError> {
    let entry = svc.get_journal(user_id, journal_id).await?;
    Ok(Json(entry.into()))
}

/// Partial update of a journal entry.
pub async fn update_journal(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(journal_id): Path<Uuid>,
    Json(req): Json<UpdateJournalReq>,
) -> Result<Json<JournalDto>, ApiError> {
    let entry = svc.update_journal(user_id, journal_id, req.into()).await?;
    Ok(Json(entry.into()))
}

/// Delete a journal entry.
pub async fn delete_journal(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(user_id): AuthUser,
    Path(journal_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    svc.delete_journal(user_id, journal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
