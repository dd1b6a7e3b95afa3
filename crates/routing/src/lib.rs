//! Token Graph Routing
//!
//! Models trading pairs as a directed graph of tokens and finds the cheapest
//! and the fewest-hop route between two tokens by bounded exhaustive search.
//! Edge costs are opaque numbers supplied by the caller.

pub mod cost;
pub mod edge;
pub mod graph;
pub mod route;
pub mod search;
pub mod vertex;

// Re-exports
pub use cost::{CostCell, CostSource, FnCost};
pub use edge::Edge;
pub use graph::{RefreshFailure, RefreshReport, TokenGraph};
pub use route::{Route, RouteSummary};
pub use search::{all_paths, cheapest_path, shortest_path, SearchLimits};
pub use vertex::Vertex;
pub use waypoint_core::{GraphError, RefreshError, RouteError, VertexId};
