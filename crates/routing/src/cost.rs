//! External cost sources for refreshable edges.
//!
//! The graph never talks to the network. A price poller owned by the caller
//! writes into a [`CostCell`] (or answers through an [`FnCost`] closure) and
//! `TokenGraph::refresh` pulls the latest value into each edge.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use waypoint_core::RefreshError;

/// Provider of a fresh cost for one edge.
pub trait CostSource: Send + Sync {
    fn current_cost(&self) -> Result<f64, RefreshError>;
}

/// Shared slot holding the latest known cost of an edge.
///
/// Clones share the same slot, so the poller keeps one handle and the edge
/// another.
#[derive(Debug, Clone)]
pub struct CostCell {
    inner: Arc<CostCellInner>,
}

#[derive(Debug)]
struct CostCellInner {
    bits: AtomicU64,
    available: AtomicBool,
}

impl CostCell {
    /// Create a cell that already holds `cost`.
    pub fn new(cost: f64) -> Self {
        Self {
            inner: Arc::new(CostCellInner {
                bits: AtomicU64::new(cost.to_bits()),
                available: AtomicBool::new(true),
            }),
        }
    }

    /// Create a cell with no value yet; reads fail until `set` is called.
    pub fn unavailable() -> Self {
        let cell = Self::new(0.0);
        cell.mark_unavailable();
        cell
    }

    /// Publish a new cost.
    pub fn set(&self, cost: f64) {
        self.inner.bits.store(cost.to_bits(), Ordering::Release);
        self.inner.available.store(true, Ordering::Release);
    }

    /// Flag the upstream as unreachable. The stored value is kept but not served.
    pub fn mark_unavailable(&self) {
        self.inner.available.store(false, Ordering::Release);
    }

    pub fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::Acquire)
    }
}

impl CostSource for CostCell {
    fn current_cost(&self) -> Result<f64, RefreshError> {
        if !self.is_available() {
            return Err(RefreshError::Unavailable {
                reason: "cost cell has no current value".to_string(),
            });
        }
        Ok(f64::from_bits(self.inner.bits.load(Ordering::Acquire)))
    }
}

/// Adapter turning a closure into a [`CostSource`].
pub struct FnCost<F>(pub F);

impl<F> FnCost<F>
where
    F: Fn() -> Result<f64, RefreshError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> CostSource for FnCost<F>
where
    F: Fn() -> Result<f64, RefreshError> + Send + Sync,
{
    fn current_cost(&self) -> Result<f64, RefreshError> {
        (self.0)()
    }
}

impl<F> fmt::Debug for FnCost<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCost(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_cell_shared_between_clones() {
        let poller_side = CostCell::new(1.0);
        let edge_side = poller_side.clone();
        assert_eq!(edge_side.current_cost().unwrap(), 1.0);

        poller_side.set(2.5);
        assert_eq!(edge_side.current_cost().unwrap(), 2.5);
    }

    #[test]
    fn test_cost_cell_unavailable() {
        let cell = CostCell::unavailable();
        assert!(!cell.is_available());
        assert!(matches!(
            cell.current_cost(),
            Err(RefreshError::Unavailable { .. })
        ));

        cell.set(4.0);
        assert_eq!(cell.current_cost().unwrap(), 4.0);

        cell.mark_unavailable();
        assert!(cell.current_cost().is_err());
    }

    #[test]
    fn test_fn_cost() {
        let source = FnCost::new(|| Ok(0.25));
        assert_eq!(source.current_cost().unwrap(), 0.25);

        let failing = FnCost::new(|| {
            Err(RefreshError::Unavailable {
                reason: "rpc timeout".into(),
            })
        });
        assert!(failing.current_cost().is_err());
    }
}
