//! Graph maintenance routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use routing::RefreshReport;
use waypoint_core::GraphSpec;

use super::graph_error_to_api;
use crate::dto::{ApiError, GraphStatsResponse, ReachableQuery, ReachableResponse};
use crate::AppState;

/// Create graph routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_graph).put(put_graph))
        .route("/refresh", post(refresh_graph))
        .route("/reachable", get(get_reachable))
}

/// GET /graph - Size and vertex names of the current graph
async fn get_graph(State(state): State<AppState>) -> Json<GraphStatsResponse> {
    let graph = state.graph().await;
    Json(GraphStatsResponse::from(graph.as_ref()))
}

/// PUT /graph - Replace the graph with a new one built from the body
async fn put_graph(
    State(state): State<AppState>,
    Json(spec): Json<GraphSpec>,
) -> Result<Json<GraphStatsResponse>, (StatusCode, Json<ApiError>)> {
    let graph = state
        .rebuild_graph(&spec)
        .await
        .map_err(graph_error_to_api)?;
    Ok(Json(GraphStatsResponse::from(graph.as_ref())))
}

/// POST /graph/refresh - Re-read refreshable edge costs
async fn refresh_graph(State(state): State<AppState>) -> Json<RefreshReport> {
    Json(state.refresh_graph().await)
}

/// GET /graph/reachable - Frontier after exactly `hops` hops
async fn get_reachable(
    State(state): State<AppState>,
    Query(query): Query<ReachableQuery>,
) -> Result<Json<ReachableResponse>, (StatusCode, Json<ApiError>)> {
    let graph = state.graph().await;
    let limits = state.search_limits(None).await;
    let frontier = graph
        .expand_n_hops_with_limit(&query.vertex, query.hops, limits.max_expansions)
        .map_err(graph_error_to_api)?;

    Ok(Json(ReachableResponse {
        frontier: frontier.into_iter().map(str::to_string).collect(),
        vertex: query.vertex,
        hops: query.hops,
    }))
}
