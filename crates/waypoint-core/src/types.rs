//! Core type definitions for Waypoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a vertex in a graph's vertex arena.
///
/// Ids are only meaningful for the graph that issued them; a rebuilt graph
/// hands out fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed, costed connection between two named vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub destination: String,
    pub cost: f64,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, cost: f64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            cost,
        }
    }
}

/// Serializable description of a whole graph.
///
/// Vertices named only by an edge are created implicitly when the graph is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphSpec {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

/// Constants
pub mod constants {
    /// Upper bound on route extensions performed by a single search.
    pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;

    /// Default HTTP port of the routing service.
    pub const DEFAULT_API_PORT: u16 = 19080;

    /// Default interval between edge cost refreshes.
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
}
