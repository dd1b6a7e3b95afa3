//! Data Transfer Objects for API requests and responses

use routing::{Route, RouteSummary, TokenGraph};
use serde::{Deserialize, Serialize};
use waypoint_core::GraphError;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub vertex_count: usize,
    pub edge_count: usize,
}

impl HealthResponse {
    pub fn new(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            vertex_count,
            edge_count,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }
}

impl From<&GraphError> for ApiError {
    fn from(error: &GraphError) -> Self {
        Self::new(error.error_code(), error.to_string())
    }
}

/// Graph overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatsResponse {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub vertices: Vec<String>,
}

impl From<&TokenGraph> for GraphStatsResponse {
    fn from(graph: &TokenGraph) -> Self {
        Self {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            vertices: graph.vertices().map(|v| v.name().to_string()).collect(),
        }
    }
}

/// Reachability query (GET /graph/reachable?vertex=..&hops=..)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachableQuery {
    pub vertex: String,
    #[serde(default = "default_hops")]
    pub hops: usize,
}

fn default_hops() -> usize {
    1
}

/// Vertices found exactly `hops` hops away, once per walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachableResponse {
    pub vertex: String,
    pub hops: usize,
    pub frontier: Vec<String>,
}

/// Route query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub source: String,
    pub destination: String,
    /// Depth bound override for this query
    #[serde(default)]
    pub max_hops: Option<usize>,
}

/// Single-route answer. `found: false` means no route within the depth bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteSummary>,
}

impl RouteResponse {
    pub fn from_route(graph: &TokenGraph, route: Option<Route>) -> Self {
        let route = route.map(|r| graph.summarize(&r));
        Self {
            found: route.is_some(),
            route,
        }
    }
}

/// Every route found by the enumeration, in discovery order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllRoutesResponse {
    pub routes: Vec<RouteSummary>,
    pub count: usize,
}

impl AllRoutesResponse {
    pub fn from_routes(graph: &TokenGraph, routes: &[Route]) -> Self {
        let routes: Vec<RouteSummary> = routes.iter().map(|r| graph.summarize(r)).collect();
        Self {
            count: routes.len(),
            routes,
        }
    }
}
