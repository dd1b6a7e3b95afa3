//! Directed, costed edges between vertices.

use std::fmt;
use std::sync::Arc;

use waypoint_core::{RefreshError, VertexId};

use crate::cost::CostSource;

/// A directed connection owned by its source vertex.
///
/// Endpoints are fixed for the edge's lifetime; only `cost` changes, and only
/// through [`Edge::refresh`].
#[derive(Clone)]
pub struct Edge {
    pub source: VertexId,
    pub destination: VertexId,
    pub cost: f64,
    cost_source: Option<Arc<dyn CostSource>>,
}

impl Edge {
    /// Plain edge with a fixed cost.
    pub fn new(source: VertexId, destination: VertexId, cost: f64) -> Self {
        Self {
            source,
            destination,
            cost,
            cost_source: None,
        }
    }

    /// Edge whose cost is re-read from `cost_source` on every refresh.
    pub fn with_cost_source(
        source: VertexId,
        destination: VertexId,
        initial_cost: f64,
        cost_source: Arc<dyn CostSource>,
    ) -> Self {
        Self {
            source,
            destination,
            cost: initial_cost,
            cost_source: Some(cost_source),
        }
    }

    /// `(source, destination, cost)`
    pub fn as_triple(&self) -> (VertexId, VertexId, f64) {
        (self.source, self.destination, self.cost)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }

    pub fn is_refreshable(&self) -> bool {
        self.cost_source.is_some()
    }

    /// Pull the current cost from the attached source.
    ///
    /// Plain edges are left untouched. On failure the previous cost is kept.
    pub fn refresh(&mut self) -> Result<(), RefreshError> {
        let Some(source) = self.cost_source.as_ref() else {
            return Ok(());
        };
        let cost = source.current_cost()?;
        if !cost.is_finite() {
            return Err(RefreshError::InvalidCost { value: cost });
        }
        self.cost = cost;
        Ok(())
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("cost", &self.cost)
            .field("refreshable", &self.is_refreshable())
            .finish()
    }
}
