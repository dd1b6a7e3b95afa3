//! Named vertices and their outgoing edges.

use waypoint_core::VertexId;

use crate::edge::Edge;

/// A named node owning its outgoing edges.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    name: String,
    outgoing: Vec<Edge>,
}

impl Vertex {
    pub fn new(id: VertexId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            outgoing: Vec::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outgoing_edges(&self) -> &[Edge] {
        &self.outgoing
    }

    pub(crate) fn outgoing_edges_mut(&mut self) -> &mut [Edge] {
        &mut self.outgoing
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Whether some outgoing edge already leads to `destination`.
    pub fn has_destination(&self, destination: VertexId) -> bool {
        self.outgoing.iter().any(|e| e.destination == destination)
    }

    /// Attach `edge` if it starts here and its destination is new.
    ///
    /// The first edge to a destination wins; later ones and edges whose source
    /// is another vertex are dropped. Returns whether the edge was attached.
    pub fn add_outgoing_edge(&mut self, edge: Edge) -> bool {
        if edge.source != self.id {
            tracing::debug!(
                "Ignoring edge {} -> {} offered to vertex {} ({})",
                edge.source,
                edge.destination,
                self.name,
                self.id
            );
            return false;
        }
        if self.has_destination(edge.destination) {
            return false;
        }
        self.outgoing.push(edge);
        true
    }

    /// Destinations reachable in one hop, in edge insertion order.
    pub fn expand_one_hop(&self) -> Vec<VertexId> {
        self.outgoing.iter().map(|e| e.destination).collect()
    }
}
