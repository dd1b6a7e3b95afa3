//! Background edge-cost refresh
//!
//! Periodically refreshes the shared graph so queries see recent costs.
//! Each cycle refreshes a copy and swaps it in; see `AppState::refresh_graph`.

use std::time::Duration;

use tokio::task::JoinHandle;
use waypoint_api::AppState;

/// Spawn the refresh loop. Returns `None` when `interval_secs` is 0.
pub fn spawn(state: AppState, interval_secs: u64) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        tracing::info!("Edge refresh disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            run_cycle(&state).await;
        }
    }))
}

/// One refresh cycle. Returns the number of edges that failed to refresh.
pub async fn run_cycle(state: &AppState) -> usize {
    let report = state.refresh_graph().await;
    if report.is_clean() {
        tracing::debug!("Refresh cycle: {} edges refreshed", report.refreshed);
    } else {
        tracing::warn!(
            "Refresh cycle: {} edges refreshed, {} failed",
            report.refreshed,
            report.failed.len()
        );
    }
    report.failed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use routing::{CostCell, TokenGraph};

    async fn state_with_cell(cell: &CostCell) -> AppState {
        let mut graph = TokenGraph::new();
        graph.ensure_vertex("a");
        graph.ensure_vertex("b");
        graph
            .add_edge_with_source("a", "b", 1.0, Arc::new(cell.clone()))
            .unwrap();
        let state = AppState::new();
        state.replace_graph(graph).await;
        state
    }

    #[tokio::test]
    async fn test_disabled_when_zero() {
        assert!(spawn(AppState::new(), 0).is_none());
    }

    #[tokio::test]
    async fn test_cycle_applies_new_cost() {
        let cell = CostCell::new(1.0);
        let state = state_with_cell(&cell).await;

        cell.set(4.0);
        assert_eq!(run_cycle(&state).await, 0);

        let route = state.graph().await.cheapest_path("a", "b").unwrap().unwrap();
        assert_eq!(route.total_cost(), 4.0);
    }

    #[tokio::test]
    async fn test_cycle_counts_failures() {
        let cell = CostCell::new(1.0);
        let state = state_with_cell(&cell).await;

        cell.mark_unavailable();
        assert_eq!(run_cycle(&state).await, 1);

        // Old cost kept
        let route = state.graph().await.cheapest_path("a", "b").unwrap().unwrap();
        assert_eq!(route.total_cost(), 1.0);
    }
}
