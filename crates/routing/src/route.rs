//! Route accumulator: a contiguous walk with a running cost.

use serde::{Deserialize, Serialize};
use waypoint_core::{RouteError, VertexId};

use crate::edge::Edge;

/// A contiguous walk through one graph.
///
/// `edge_costs[i]` is the cost of the hop `nodes[i] -> nodes[i + 1]`, and
/// `total_cost` is their sum. Every mutation keeps the walk contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    nodes: Vec<VertexId>,
    edge_costs: Vec<f64>,
    total_cost: f64,
}

/// Display form of a route with vertex names resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub nodes: Vec<String>,
    pub edge_costs: Vec<f64>,
    pub total_cost: f64,
    pub hops: usize,
}

impl Route {
    /// Zero-hop route anchored at `origin`.
    pub fn null(origin: VertexId) -> Self {
        Self {
            nodes: vec![origin],
            edge_costs: Vec::new(),
            total_cost: 0.0,
        }
    }

    pub fn origin(&self) -> VertexId {
        self.nodes[0]
    }

    pub fn terminal(&self) -> VertexId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn nodes(&self) -> &[VertexId] {
        &self.nodes
    }

    pub fn edge_costs(&self) -> &[f64] {
        &self.edge_costs
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn hop_count(&self) -> usize {
        self.edge_costs.len()
    }

    pub fn is_null(&self) -> bool {
        self.edge_costs.is_empty()
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.nodes.contains(&vertex)
    }

    /// Extend the route by one hop along `edge`.
    pub fn append(&mut self, edge: &Edge) -> Result<(), RouteError> {
        let terminal = self.terminal();
        if edge.source != terminal {
            return Err(RouteError::Teleportation {
                edge_source: edge.source,
                terminal,
            });
        }
        self.nodes.push(edge.destination);
        self.edge_costs.push(edge.cost);
        self.total_cost += edge.cost;
        Ok(())
    }

    /// Drop the last `hops` hops.
    pub fn truncate(&mut self, hops: usize) -> Result<(), RouteError> {
        let available = self.hop_count();
        if hops > available {
            return Err(RouteError::Depth {
                requested: hops,
                available,
            });
        }
        for _ in 0..hops {
            if let Some(cost) = self.edge_costs.pop() {
                self.total_cost -= cost;
            }
            self.nodes.pop();
        }
        if self.is_null() {
            self.total_cost = 0.0;
        }
        Ok(())
    }

    /// Join `other` onto the end of this route.
    ///
    /// `other` must start where this route ends.
    pub fn concat(&self, other: &Route) -> Result<Route, RouteError> {
        let terminal = self.terminal();
        if other.origin() != terminal {
            return Err(RouteError::Teleportation {
                edge_source: other.origin(),
                terminal,
            });
        }
        let mut joined = self.clone();
        joined.nodes.extend_from_slice(&other.nodes[1..]);
        joined.edge_costs.extend_from_slice(&other.edge_costs);
        joined.total_cost += other.total_cost;
        Ok(joined)
    }

    /// Re-sum `edge_costs` into `total_cost`.
    pub fn recompute_cost(&mut self) {
        self.total_cost = self.edge_costs.iter().sum();
    }
}
