//! API route handlers

pub mod graph;
pub mod health;
pub mod paths;

use axum::{http::StatusCode, routing::get, Json, Router};
use waypoint_core::GraphError;

use crate::dto::ApiError;
use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/graph", graph::router())
        .nest("/route", paths::router())
        .with_state(state)
}

/// Convert a graph error to an API error response
pub(crate) fn graph_error_to_api(error: GraphError) -> (StatusCode, Json<ApiError>) {
    let status = match error.status_code() {
        400 => StatusCode::BAD_REQUEST,
        404 => StatusCode::NOT_FOUND,
        422 => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Route search failed: {}", error);
    }

    (status, Json(ApiError::from(&error)))
}
