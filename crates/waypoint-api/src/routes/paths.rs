//! Route search endpoints

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use super::graph_error_to_api;
use crate::dto::{AllRoutesResponse, ApiError, RouteRequest, RouteResponse};
use crate::AppState;

/// Create route search routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cheapest", post(find_cheapest))
        .route("/shortest", post(find_shortest))
        .route("/all", post(find_all))
}

/// POST /route/cheapest - Minimum total cost route
async fn find_cheapest(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ApiError>)> {
    let graph = state.graph().await;
    let limits = state.search_limits(req.max_hops).await;

    let route = graph
        .cheapest_path_with_limits(&req.source, &req.destination, &limits)
        .map_err(graph_error_to_api)?;

    Ok(Json(RouteResponse::from_route(&graph, route)))
}

/// POST /route/shortest - Fewest hops route
async fn find_shortest(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ApiError>)> {
    let graph = state.graph().await;
    let limits = state.search_limits(req.max_hops).await;

    let route = graph
        .shortest_path_with_limits(&req.source, &req.destination, &limits)
        .map_err(graph_error_to_api)?;

    Ok(Json(RouteResponse::from_route(&graph, route)))
}

/// POST /route/all - Every route within the depth bound
async fn find_all(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<AllRoutesResponse>, (StatusCode, Json<ApiError>)> {
    let graph = state.graph().await;
    let limits = state.search_limits(req.max_hops).await;

    let routes = graph
        .all_paths_with_limits(&req.source, &req.destination, &limits)
        .map_err(graph_error_to_api)?;

    tracing::debug!(
        "{} -> {}: {} routes",
        req.source,
        req.destination,
        routes.len()
    );

    Ok(Json(AllRoutesResponse::from_routes(&graph, &routes)))
}
