//! Token graph registry.
//!
//! Vertices live in an arena indexed by [`VertexId`]; a name index maps token
//! identifiers to ids. Edges are value structs stored on their source vertex,
//! so the graph holds no back-pointers and can be cloned and swapped as a
//! whole snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use waypoint_core::constants::DEFAULT_MAX_EXPANSIONS;
use waypoint_core::{GraphError, GraphSpec, RefreshError, VertexId};

use crate::cost::CostSource;
use crate::edge::Edge;
use crate::route::{Route, RouteSummary};
use crate::vertex::Vertex;

/// Directed graph of named vertices.
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexId>,
}

/// A single edge whose refresh failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshFailure {
    pub source: String,
    pub destination: String,
    pub reason: String,
}

/// Outcome of [`TokenGraph::refresh`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Edges whose cost was re-read from their cost source
    pub refreshed: usize,
    /// Edges that kept their previous cost because the source failed
    pub failed: Vec<RefreshFailure>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl TokenGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a serializable description.
    ///
    /// Edge endpoints missing from `spec.vertices` are created implicitly.
    /// Fails on the first edge with a non-finite cost.
    pub fn from_spec(spec: &GraphSpec) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for name in &spec.vertices {
            graph.ensure_vertex(name);
        }
        for edge in &spec.edges {
            check_cost(&edge.source, &edge.destination, edge.cost)?;
            let source = graph.ensure_vertex(&edge.source);
            let destination = graph.ensure_vertex(&edge.destination);
            graph.attach(Edge::new(source, destination, edge.cost));
        }
        Ok(graph)
    }

    /// Return the id of `name`, creating the vertex if absent.
    pub fn ensure_vertex(&mut self, name: &str) -> VertexId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(id, name));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Add a directed edge between two existing vertices.
    ///
    /// Returns `Ok(false)` when the source already has an edge to `destination`.
    /// Costs must be finite.
    pub fn add_edge(
        &mut self,
        source: &str,
        destination: &str,
        cost: f64,
    ) -> Result<bool, GraphError> {
        let (source, destination) = self.resolve_pair(source, destination)?;
        check_cost_at(self, source, destination, cost)?;
        Ok(self.attach(Edge::new(source, destination, cost)))
    }

    /// Add a directed edge whose cost is refreshed from `cost_source`.
    pub fn add_edge_with_source(
        &mut self,
        source: &str,
        destination: &str,
        initial_cost: f64,
        cost_source: Arc<dyn CostSource>,
    ) -> Result<bool, GraphError> {
        let (source, destination) = self.resolve_pair(source, destination)?;
        check_cost_at(self, source, destination, initial_cost)?;
        Ok(self.attach(Edge::with_cost_source(
            source,
            destination,
            initial_cost,
            cost_source,
        )))
    }

    fn resolve_pair(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<(VertexId, VertexId), GraphError> {
        Ok((self.require(source)?, self.require(destination)?))
    }

    fn attach(&mut self, edge: Edge) -> bool {
        match self.vertices.get_mut(edge.source.index()) {
            Some(vertex) => vertex.add_outgoing_edge(edge),
            None => false,
        }
    }

    /// Re-read the cost of every refreshable edge.
    ///
    /// Failures keep the former cost and are collected in the report; they
    /// never abort the pass.
    pub fn refresh(&mut self) -> RefreshReport {
        let mut report = RefreshReport::default();
        let mut failures: Vec<(VertexId, VertexId, RefreshError)> = Vec::new();

        for vertex in &mut self.vertices {
            for edge in vertex.outgoing_edges_mut() {
                if !edge.is_refreshable() {
                    continue;
                }
                match edge.refresh() {
                    Ok(()) => report.refreshed += 1,
                    Err(e) => failures.push((edge.source, edge.destination, e)),
                }
            }
        }

        for (source, destination, error) in failures {
            let failure = RefreshFailure {
                source: self.name_or_id(source),
                destination: self.name_or_id(destination),
                reason: error.to_string(),
            };
            tracing::warn!(
                "Keeping previous cost for {} -> {}: {}",
                failure.source,
                failure.destination,
                failure.reason
            );
            report.failed.push(failure);
        }

        tracing::debug!(
            "Graph refresh: {} edges updated, {} failed",
            report.refreshed,
            report.failed.len()
        );
        report
    }

    fn name_or_id(&self, id: VertexId) -> String {
        self.vertex_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(Vertex::out_degree).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    /// Like [`vertex_id`](Self::vertex_id) but reports absence as an error.
    pub fn require(&self, name: &str) -> Result<VertexId, GraphError> {
        self.vertex_id(name).ok_or_else(|| GraphError::UnknownVertex {
            name: name.to_string(),
        })
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.vertex_id(name).and_then(|id| self.vertex_at(id))
    }

    pub fn vertex_at(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn vertex_name(&self, id: VertexId) -> Option<&str> {
        self.vertex_at(id).map(Vertex::name)
    }

    /// All vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Vertex names along `route`, origin first.
    pub fn node_names(&self, route: &Route) -> Vec<&str> {
        route
            .nodes()
            .iter()
            .filter_map(|id| self.vertex_name(*id))
            .collect()
    }

    pub fn summarize(&self, route: &Route) -> RouteSummary {
        RouteSummary {
            nodes: self
                .node_names(route)
                .into_iter()
                .map(str::to_string)
                .collect(),
            edge_costs: route.edge_costs().to_vec(),
            total_cost: route.total_cost(),
            hops: route.hop_count(),
        }
    }

    // -----------------------------------------------------------------------
    // Layer expansion (diagnostics)
    // -----------------------------------------------------------------------

    /// Frontier after exactly `hops` one-hop expansions from `name`.
    ///
    /// Vertices reachable through several walks appear once per walk.
    pub fn expand_n_hops(&self, name: &str, hops: usize) -> Result<Vec<&str>, GraphError> {
        self.expand_n_hops_with_limit(name, hops, DEFAULT_MAX_EXPANSIONS)
    }

    /// [`expand_n_hops`](Self::expand_n_hops) with an explicit cap on the
    /// number of frontier entries produced.
    pub fn expand_n_hops_with_limit(
        &self,
        name: &str,
        hops: usize,
        max_expansions: usize,
    ) -> Result<Vec<&str>, GraphError> {
        let layers = self.reachable_layers_with_limit(name, hops, max_expansions)?;
        Ok(match layers.into_iter().last() {
            Some((frontier, hop)) if hop == hops => frontier,
            _ => Vec::new(),
        })
    }

    /// Frontiers for every hop count from 0 through `hops`, paired with the
    /// hop count. Layer 0 holds `name` itself.
    ///
    /// Stops after the first empty frontier, so fewer than `hops + 1` layers
    /// come back when the walk dies out early.
    pub fn reachable_layers(
        &self,
        name: &str,
        hops: usize,
    ) -> Result<Vec<(Vec<&str>, usize)>, GraphError> {
        self.reachable_layers_with_limit(name, hops, DEFAULT_MAX_EXPANSIONS)
    }

    /// [`reachable_layers`](Self::reachable_layers) bounded by
    /// `max_expansions`. Every round costs at least one expansion, so cyclic
    /// graphs cannot loop for `hops` rounds.
    pub fn reachable_layers_with_limit(
        &self,
        name: &str,
        hops: usize,
        max_expansions: usize,
    ) -> Result<Vec<(Vec<&str>, usize)>, GraphError> {
        let start = self.require(name)?;
        let mut current = vec![start];
        let mut layers = vec![(self.names_of(&current), 0)];
        let mut expansions = 0usize;

        for hop in 1..=hops {
            current = current
                .iter()
                .filter_map(|id| self.vertex_at(*id))
                .flat_map(Vertex::expand_one_hop)
                .collect();

            expansions = expansions.saturating_add(current.len().max(1));
            if expansions > max_expansions {
                tracing::warn!(
                    "Layer expansion from {} aborted at hop {} after {} expansions",
                    name,
                    hop,
                    max_expansions
                );
                return Err(GraphError::ExpansionLimit {
                    limit: max_expansions,
                });
            }

            layers.push((self.names_of(&current), hop));
            if current.is_empty() {
                break;
            }
        }

        Ok(layers)
    }

    fn names_of(&self, ids: &[VertexId]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.vertex_name(*id)).collect()
    }
}

fn check_cost(source: &str, destination: &str, cost: f64) -> Result<(), GraphError> {
    if cost.is_finite() {
        return Ok(());
    }
    Err(GraphError::InvalidCost {
        edge_source: source.to_string(),
        edge_destination: destination.to_string(),
        value: cost,
    })
}

fn check_cost_at(
    graph: &TokenGraph,
    source: VertexId,
    destination: VertexId,
    cost: f64,
) -> Result<(), GraphError> {
    if cost.is_finite() {
        return Ok(());
    }
    check_cost(&graph.name_or_id(source), &graph.name_or_id(destination), cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostCell;
    use waypoint_core::EdgeSpec;

    fn make_graph(names: &[&str], edges: &[(&str, &str, f64)]) -> TokenGraph {
        let mut graph = TokenGraph::new();
        for name in names {
            graph.ensure_vertex(name);
        }
        for (source, destination, cost) in edges {
            graph.add_edge(source, destination, *cost).unwrap();
        }
        graph
    }

    // -- Construction --

    #[test]
    fn test_ensure_vertex_idempotent() {
        let mut graph = TokenGraph::new();
        let a = graph.ensure_vertex("a");
        let b = graph.ensure_vertex("b");
        assert_eq!(graph.ensure_vertex("a"), a);
        assert_ne!(a, b);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.vertex_name(b), Some("b"));
    }

    #[test]
    fn test_add_edge_requires_known_vertices() {
        let mut graph = make_graph(&["a"], &[]);
        let err = graph.add_edge("a", "zzz", 1.0).unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex { name: "zzz".into() });

        let err = graph.add_edge("yyy", "a", 1.0).unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex { name: "yyy".into() });
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_destination_ignored() {
        let mut graph = make_graph(&["a", "b"], &[("a", "b", 1.0)]);
        assert!(!graph.add_edge("a", "b", 0.5).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.vertex("a").unwrap().outgoing_edges()[0].cost, 1.0);

        // Reverse direction is a different edge
        assert!(graph.add_edge("b", "a", 0.5).unwrap());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_from_spec_creates_missing_vertices() {
        let spec = GraphSpec {
            vertices: vec!["a".into()],
            edges: vec![EdgeSpec::new("a", "b", 1.0), EdgeSpec::new("b", "c", 2.0)],
        };
        let graph = TokenGraph::from_spec(&spec).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains("c"));
    }

    #[test]
    fn test_non_finite_cost_rejected() {
        let mut graph = make_graph(&["a", "b"], &[]);
        for bad in [f64::NAN, -f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = graph.add_edge("a", "b", bad).unwrap_err();
            assert!(matches!(err, GraphError::InvalidCost { .. }));
        }
        let err = graph
            .add_edge_with_source("a", "b", f64::NAN, Arc::new(CostCell::new(1.0)))
            .unwrap_err();
        assert_eq!(err.error_code(), "invalid_cost");
        assert_eq!(graph.edge_count(), 0);

        assert!(graph.add_edge("a", "b", -2.0).unwrap());
    }

    #[test]
    fn test_from_spec_rejects_non_finite_cost() {
        let spec = GraphSpec {
            vertices: vec![],
            edges: vec![
                EdgeSpec::new("a", "b", 1.0),
                EdgeSpec::new("b", "c", f64::INFINITY),
            ],
        };
        let err = TokenGraph::from_spec(&spec).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidCost {
                edge_source: "b".into(),
                edge_destination: "c".into(),
                value: f64::INFINITY,
            }
        );
    }

    // -- Refresh --

    #[test]
    fn test_refresh_updates_sourced_edges() {
        let mut graph = make_graph(&["a", "b", "c"], &[("b", "c", 3.0)]);
        let cell = CostCell::new(2.0);
        graph
            .add_edge_with_source("a", "b", 1.0, Arc::new(cell.clone()))
            .unwrap();

        let report = graph.refresh();
        assert_eq!(report.refreshed, 1);
        assert!(report.is_clean());
        assert_eq!(graph.vertex("a").unwrap().outgoing_edges()[0].cost, 2.0);
        assert_eq!(graph.vertex("b").unwrap().outgoing_edges()[0].cost, 3.0);
    }

    #[test]
    fn test_refresh_idempotent() {
        let mut graph = make_graph(&["a", "b"], &[]);
        let cell = CostCell::new(0.7);
        graph
            .add_edge_with_source("a", "b", 1.0, Arc::new(cell))
            .unwrap();

        graph.refresh();
        let first: Vec<f64> = graph.vertex("a").unwrap().outgoing_edges().iter().map(|e| e.cost).collect();
        graph.refresh();
        let second: Vec<f64> = graph.vertex("a").unwrap().outgoing_edges().iter().map(|e| e.cost).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_refresh_failure_keeps_cost_and_is_reported() {
        let mut graph = make_graph(&["a", "b", "c"], &[]);
        let bad = CostCell::new(9.0);
        bad.mark_unavailable();
        let good = CostCell::new(4.0);
        graph
            .add_edge_with_source("a", "b", 1.0, Arc::new(bad))
            .unwrap();
        graph
            .add_edge_with_source("b", "c", 1.0, Arc::new(good))
            .unwrap();

        let report = graph.refresh();
        assert_eq!(report.refreshed, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].source, "a");
        assert_eq!(report.failed[0].destination, "b");
        assert_eq!(graph.vertex("a").unwrap().outgoing_edges()[0].cost, 1.0);
        assert_eq!(graph.vertex("b").unwrap().outgoing_edges()[0].cost, 4.0);
    }

    // -- Expansion --

    #[test]
    fn test_expand_n_hops() {
        let graph = make_graph(
            &["a", "b", "c", "d"],
            &[("a", "b", 1.0), ("a", "c", 1.0), ("b", "d", 1.0), ("c", "d", 1.0)],
        );
        assert_eq!(graph.expand_n_hops("a", 0).unwrap(), vec!["a"]);
        assert_eq!(graph.expand_n_hops("a", 1).unwrap(), vec!["b", "c"]);
        // d is reached through two walks and listed twice
        assert_eq!(graph.expand_n_hops("a", 2).unwrap(), vec!["d", "d"]);
        assert!(graph.expand_n_hops("a", 3).unwrap().is_empty());
        assert!(graph.expand_n_hops("zzz", 1).is_err());
    }

    #[test]
    fn test_reachable_layers() {
        let graph = make_graph(&["a", "b", "c"], &[("a", "b", 1.0), ("b", "c", 1.0)]);
        let layers = graph.reachable_layers("a", 3).unwrap();
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[0], (vec!["a"], 0));
        assert_eq!(layers[1], (vec!["b"], 1));
        assert_eq!(layers[2], (vec!["c"], 2));
        assert_eq!(layers[3], (Vec::<&str>::new(), 3));
    }

    #[test]
    fn test_layers_stop_when_walk_dies_out() {
        let graph = make_graph(&["a", "b"], &[("a", "b", 1.0)]);
        let layers = graph.reachable_layers("a", usize::MAX).unwrap();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[2], (Vec::<&str>::new(), 2));
        assert!(graph.expand_n_hops("a", usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_layers_on_cycle_hit_expansion_cap() {
        let graph = make_graph(&["a", "b"], &[("a", "b", 1.0), ("b", "a", 1.0)]);

        let err = graph.reachable_layers_with_limit("a", usize::MAX, 100).unwrap_err();
        assert_eq!(err, GraphError::ExpansionLimit { limit: 100 });

        let err = graph.expand_n_hops("a", usize::MAX).unwrap_err();
        assert_eq!(
            err,
            GraphError::ExpansionLimit {
                limit: DEFAULT_MAX_EXPANSIONS
            }
        );

        // Within the cap the cycle alternates
        assert_eq!(graph.expand_n_hops_with_limit("a", 3, 100).unwrap(), vec!["b"]);
        assert_eq!(graph.expand_n_hops_with_limit("a", 4, 100).unwrap(), vec!["a"]);
    }

    // -- Display --

    #[test]
    fn test_node_names_and_summary() {
        let graph = make_graph(&["a", "b"], &[("a", "b", 1.5)]);
        let mut route = Route::null(graph.vertex_id("a").unwrap());
        route
            .append(&graph.vertex("a").unwrap().outgoing_edges()[0])
            .unwrap();

        assert_eq!(graph.node_names(&route), vec!["a", "b"]);
        let summary = graph.summarize(&route);
        assert_eq!(summary.nodes, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(summary.hops, 1);
        assert_eq!(summary.total_cost, 1.5);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nodes"], serde_json::json!(["a", "b"]));
        assert_eq!(json["hops"], 1);
    }
}
