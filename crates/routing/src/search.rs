//! Depth-bounded route search over a [`TokenGraph`].
//!
//! All three searches expand the same way: round `k` extends every partial
//! route from round `k - 1` by one edge, so every route produced in round `k`
//! has exactly `k` hops. The search is exhaustive and exponential in the
//! depth bound; it is meant for graphs of at most a few hundred vertices.

use waypoint_core::{constants::DEFAULT_MAX_EXPANSIONS, GraphError, SearchConfig, VertexId};

use crate::graph::TokenGraph;
use crate::route::Route;

/// Bounds applied to a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum hops per route. `None` uses the graph's vertex count.
    pub max_hops: Option<usize>,
    /// Route extensions allowed before the search is aborted
    pub max_expansions: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_hops: None,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl SearchLimits {
    pub fn with_max_hops(max_hops: usize) -> Self {
        Self {
            max_hops: Some(max_hops),
            ..Self::default()
        }
    }

    fn depth_bound(&self, graph: &TokenGraph) -> usize {
        self.max_hops.unwrap_or_else(|| graph.vertex_count())
    }
}

impl From<SearchConfig> for SearchLimits {
    fn from(config: SearchConfig) -> Self {
        Self {
            max_hops: config.max_hops,
            max_expansions: config.max_expansions,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stop {
    FirstFound,
    Exhaustive,
}

/// Every route from `source` to `target` within the depth bound.
///
/// Self-loops are never taken. A route may not step onto a vertex it already
/// visited, except its own origin. A route ends as soon as it reaches `target`.
/// Routes are returned in discovery order.
pub fn all_paths(
    graph: &TokenGraph,
    source: &str,
    target: &str,
    limits: &SearchLimits,
) -> Result<Vec<Route>, GraphError> {
    let (origin, goal) = (graph.require(source)?, graph.require(target)?);
    expand(graph, origin, goal, limits, Stop::Exhaustive)
}

/// Lowest `total_cost` route from `source` to `target`.
///
/// Ties go to the route discovered first. `Ok(None)` means no route exists
/// within the depth bound.
pub fn cheapest_path(
    graph: &TokenGraph,
    source: &str,
    target: &str,
    limits: &SearchLimits,
) -> Result<Option<Route>, GraphError> {
    let routes = all_paths(graph, source, target, limits)?;
    Ok(routes
        .into_iter()
        .min_by(|a, b| a.total_cost().total_cmp(&b.total_cost())))
}

/// Fewest-hop route from `source` to `target`, ignoring cost.
pub fn shortest_path(
    graph: &TokenGraph,
    source: &str,
    target: &str,
    limits: &SearchLimits,
) -> Result<Option<Route>, GraphError> {
    let (origin, goal) = (graph.require(source)?, graph.require(target)?);
    let routes = expand(graph, origin, goal, limits, Stop::FirstFound)?;
    Ok(routes.into_iter().next())
}

fn expand(
    graph: &TokenGraph,
    origin: VertexId,
    goal: VertexId,
    limits: &SearchLimits,
    stop: Stop,
) -> Result<Vec<Route>, GraphError> {
    let max_hops = limits.depth_bound(graph);
    let mut work = vec![Route::null(origin)];
    let mut found = Vec::new();
    let mut expansions = 0usize;

    for round in 1..=max_hops {
        if work.is_empty() {
            break;
        }
        let mut next = Vec::new();

        for partial in &work {
            let Some(vertex) = graph.vertex_at(partial.terminal()) else {
                continue;
            };
            for edge in vertex.outgoing_edges() {
                if edge.is_self_loop() {
                    continue;
                }
                if partial.contains(edge.destination) && edge.destination != partial.origin() {
                    continue;
                }

                expansions += 1;
                if expansions > limits.max_expansions {
                    tracing::warn!(
                        "Route search {} -> {} aborted in round {} after {} expansions",
                        origin,
                        goal,
                        round,
                        limits.max_expansions
                    );
                    return Err(GraphError::ExpansionLimit {
                        limit: limits.max_expansions,
                    });
                }

                let mut extended = partial.clone();
                extended.append(edge)?;
                if extended.terminal() == goal {
                    found.push(extended);
                    if stop == Stop::FirstFound {
                        return Ok(found);
                    }
                } else {
                    next.push(extended);
                }
            }
        }

        work = next;
    }

    tracing::debug!(
        "Route search {} -> {}: {} routes found, {} expansions, depth bound {}",
        origin,
        goal,
        found.len(),
        expansions,
        max_hops
    );
    Ok(found)
}

impl TokenGraph {
    /// [`all_paths`] with the vertex count as depth bound.
    pub fn all_paths(&self, source: &str, target: &str) -> Result<Vec<Route>, GraphError> {
        all_paths(self, source, target, &SearchLimits::default())
    }

    /// [`cheapest_path`] with the vertex count as depth bound.
    pub fn cheapest_path(&self, source: &str, target: &str) -> Result<Option<Route>, GraphError> {
        cheapest_path(self, source, target, &SearchLimits::default())
    }

    /// [`shortest_path`] with the vertex count as depth bound.
    pub fn shortest_path(&self, source: &str, target: &str) -> Result<Option<Route>, GraphError> {
        shortest_path(self, source, target, &SearchLimits::default())
    }

    pub fn all_paths_with_limits(
        &self,
        source: &str,
        target: &str,
        limits: &SearchLimits,
    ) -> Result<Vec<Route>, GraphError> {
        all_paths(self, source, target, limits)
    }

    pub fn cheapest_path_with_limits(
        &self,
        source: &str,
        target: &str,
        limits: &SearchLimits,
    ) -> Result<Option<Route>, GraphError> {
        cheapest_path(self, source, target, limits)
    }

    pub fn shortest_path_with_limits(
        &self,
        source: &str,
        target: &str,
        limits: &SearchLimits,
    ) -> Result<Option<Route>, GraphError> {
        shortest_path(self, source, target, limits)
    }
}
