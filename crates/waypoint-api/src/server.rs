//! HTTP server setup and configuration

use std::net::SocketAddr;

use axum::{http::StatusCode, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::dto::ApiError;
use crate::routes::create_router;
use crate::AppState;

/// Create the full application router with middleware.
///
/// Unknown paths answer with a JSON `not_found` error like every other
/// failure of the API.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::not_found("No such endpoint")),
    )
}

/// Bind `addr` and serve the API until the listener fails
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_app(state)).await
}
