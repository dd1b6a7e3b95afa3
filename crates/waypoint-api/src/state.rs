//! Application state shared across API handlers

use std::sync::Arc;

use routing::{RefreshReport, SearchLimits, TokenGraph};
use tokio::sync::RwLock;
use waypoint_core::{AppConfig, GraphError, GraphSpec};

/// Shared application state
///
/// The graph is held as an `Arc` snapshot. Readers clone the `Arc` and drop
/// the lock before searching; writers build a complete new graph and swap it
/// in, so a query always sees one consistent graph.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    graph: RwLock<Arc<TokenGraph>>,
}

impl AppState {
    /// Create a new application state with default config and an empty graph
    pub fn new() -> Self {
        Self::from_parts(AppConfig::default(), TokenGraph::new())
    }

    /// Create with a specific config, building the seed graph if one is set
    pub fn with_config(config: AppConfig) -> Result<Self, GraphError> {
        let graph = match &config.seed_graph {
            Some(spec) => TokenGraph::from_spec(spec)?,
            None => TokenGraph::new(),
        };
        if !graph.is_empty() {
            tracing::info!(
                "Seed graph loaded: {} vertices, {} edges",
                graph.vertex_count(),
                graph.edge_count()
            );
        }

        Ok(Self::from_parts(config, graph))
    }

    fn from_parts(config: AppConfig, graph: TokenGraph) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                graph: RwLock::new(Arc::new(graph)),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Search limits from config, with an optional per-request depth bound
    pub async fn search_limits(&self, max_hops: Option<usize>) -> SearchLimits {
        let mut limits = SearchLimits::from(self.inner.config.read().await.search);
        if max_hops.is_some() {
            limits.max_hops = max_hops;
        }
        limits
    }

    /// Current graph snapshot
    pub async fn graph(&self) -> Arc<TokenGraph> {
        self.inner.graph.read().await.clone()
    }

    /// Swap in a freshly built graph
    pub async fn replace_graph(&self, graph: TokenGraph) -> Arc<TokenGraph> {
        let graph = Arc::new(graph);
        let mut current = self.inner.graph.write().await;
        *current = graph.clone();
        tracing::info!(
            "Graph replaced: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    /// Rebuild the graph from a description. The current graph is kept if
    /// the description is invalid.
    pub async fn rebuild_graph(&self, spec: &GraphSpec) -> Result<Arc<TokenGraph>, GraphError> {
        let graph = TokenGraph::from_spec(spec)?;
        Ok(self.replace_graph(graph).await)
    }

    /// Refresh edge costs on a copy of the current graph and swap it in.
    ///
    /// If the graph was replaced while the copy was refreshing, the newer
    /// graph is kept and the refreshed copy is discarded.
    pub async fn refresh_graph(&self) -> RefreshReport {
        let snapshot = self.graph().await;
        let mut refreshed = TokenGraph::clone(&snapshot);
        let report = refreshed.refresh();
        self.commit_refreshed(&snapshot, refreshed).await;
        report
    }

    /// Swap in `refreshed` if `snapshot` is still the current graph.
    async fn commit_refreshed(&self, snapshot: &Arc<TokenGraph>, refreshed: TokenGraph) -> bool {
        let mut current = self.inner.graph.write().await;
        if !Arc::ptr_eq(&*current, snapshot) {
            tracing::debug!("Graph replaced during refresh; discarding refreshed copy");
            return false;
        }
        *current = Arc::new(refreshed);
        true
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
