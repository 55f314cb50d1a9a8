use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Routes mounted under `/api`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/system",
            get(handlers::get_system).put(handlers::update_system),
        )
        .route("/system/reset", post(handlers::reset_system))
        .route("/system/stats", get(handlers::system_stats))
        .route("/system/export", get(handlers::export_system))
        .route("/system/guidance", get(handlers::guidance))
        .route(
            "/parts",
            get(handlers::list_parts).post(handlers::create_part),
        )
        .route(
            "/parts/{id}",
            get(handlers::get_part)
                .put(handlers::update_part)
                .delete(handlers::delete_part),
        )
        .route(
            "/relationships",
            get(handlers::list_relationships).post(handlers::create_relationship),
        )
        .route(
            "/relationships/{id}",
            get(handlers::get_relationship)
                .put(handlers::update_relationship)
                .delete(handlers::delete_relationship),
        )
        .route(
            "/journals",
            get(handlers::list_journals).post(handlers::create_journal),
        )
        .route(
            "/journals/{id}",
            get(handlers::get_journal)
                .put(handlers::update_journal)
                .delete(handlers::delete_journal),
        )
        .layer(Extension(service))
}
