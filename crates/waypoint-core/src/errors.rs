//! Error types for Waypoint

use thiserror::Error;

use crate::VertexId;

/// Core errors that can occur in Waypoint
#[derive(Debug, Error)]
pub enum Error {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by graph queries and construction.
///
/// "No route" is not an error: searches return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("Unknown vertex: {name}")]
    UnknownVertex { name: String },

    #[error("Search aborted after {limit} route expansions")]
    ExpansionLimit { limit: usize },

    #[error("Edge {edge_source} -> {edge_destination} has a non-finite cost: {value}")]
    InvalidCost {
        edge_source: String,
        edge_destination: String,
        value: f64,
    },

    #[error("Route invariant violated: {0}")]
    Route(#[from] RouteError),
}

/// Route invariant violations. Reaching one of these indicates a bug in the
/// caller, not a user-facing condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Teleportation detected: edge starts at {edge_source}, route ends at {terminal}")]
    Teleportation {
        edge_source: VertexId,
        terminal: VertexId,
    },

    #[error("Cannot truncate {requested} hops from a route of {available}")]
    Depth { requested: usize, available: usize },
}

/// Failure to obtain a fresh edge cost. The edge keeps its previous cost.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefreshError {
    #[error("Cost source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Cost source returned a non-finite cost: {value}")]
    InvalidCost { value: f64 },
}

/// Result type alias for Waypoint operations
pub type Result<T> = std::result::Result<T, Error>;

impl GraphError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVertex { .. } => "unknown_vertex",
            Self::ExpansionLimit { .. } => "expansion_limit",
            Self::InvalidCost { .. } => "invalid_cost",
            Self::Route(RouteError::Teleportation { .. }) => "route_teleportation",
            Self::Route(RouteError::Depth { .. }) => "route_depth",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownVertex { .. } => 404,
            Self::ExpansionLimit { .. } => 422,
            Self::InvalidCost { .. } => 400,
            Self::Route(_) => 500,
        }
    }
}
