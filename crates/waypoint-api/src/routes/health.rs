//! Health check endpoint

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::AppState;

/// GET /health - Check API health and report the loaded graph size
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let graph = state.graph().await;
    Json(HealthResponse::new(graph.vertex_count(), graph.edge_count()))
}
