//! A [`DependencyGraph`] that can be shared between threads.
//!
//! Readers (queries and simulations) run concurrently; `reload` and
//! `set_process_importance` take the write lock and are exclusive. A
//! simulation therefore always sees one consistent graph, never a
//! half-applied reload.

use crate::config::GraphConfig;
use crate::domain::SimulationResult;
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::simulation::SimulationEngine;
use std::sync::{Arc, RwLock};

/// Cloneable, thread-safe handle to one graph.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<DependencyGraph>>,
}

impl SharedGraph {
    /// Wrap an existing graph.
    #[must_use]
    pub fn new(graph: DependencyGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Run `f` with shared read access to the graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::LockPoisoned` if a writer panicked.
    pub fn read<T>(&self, f: impl FnOnce(&DependencyGraph) -> T) -> Result<T> {
        let guard = self.inner.read().map_err(|_| Error::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Replace the graph. On error the previous graph stays in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid definition and
    /// `Error::LockPoisoned` if the lock is poisoned.
    pub fn reload(&self, config: &GraphConfig) -> Result<()> {
        let mut guard = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        guard.load(config)
    }

    /// Set a business process importance override; returns the stored score.
    ///
    /// # Errors
    ///
    /// Returns `Error::LockPoisoned` if the lock is poisoned.
    pub fn set_process_importance(&self, process: impl Into<String>, score: i64) -> Result<u8> {
        let mut guard = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        Ok(guard.set_process_importance(process, score))
    }

    /// Simulate a failure against the current graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceNotFound` for unknown services and
    /// `Error::LockPoisoned` if the lock is poisoned.
    pub fn simulate<S: AsRef<str>>(
        &self,
        failed_services: &[S],
        peak_hours: bool,
    ) -> Result<SimulationResult> {
        self.read(|graph| SimulationEngine::new(graph).simulate_failure(failed_services, peak_hours))?
    }
}

impl From<DependencyGraph> for SharedGraph {
    fn from(graph: DependencyGraph) -> Self {
        Self::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Service;
    use std::collections::BTreeMap;
    use std::thread;

    fn config(services: Vec<Service>) -> GraphConfig {
        GraphConfig {
            business_processes: BTreeMap::new(),
            services,
        }
    }

    fn chain() -> SharedGraph {
        let shared = SharedGraph::default();
        shared
            .reload(&config(vec![
                Service::new("a"),
                Service::new("b").with_depends_on(["a"]),
            ]))
            .unwrap();
        shared
    }

    #[test]
    fn concurrent_simulations_agree() {
        let shared = chain();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.simulate(&["a"], false).unwrap().total_impact_score)
            })
            .collect();

        for handle in handles {
            let total = handle.join().unwrap();
            assert!((total - 250.0).abs() < 1e-9);
        }
    }

    #[test]
    fn reload_is_visible_to_later_readers() {
        let shared = chain();
        shared.reload(&config(vec![Service::new("solo")])).unwrap();

        assert!(shared.read(|g| g.contains("solo")).unwrap());
        assert!(!shared.read(|g| g.contains("a")).unwrap());
    }

    #[test]
    fn failed_reload_keeps_previous_graph() {
        let shared = chain();

        assert!(shared.reload(&config(vec![Service::new("")])).is_err());
        assert!(shared.read(|g| g.contains("a")).unwrap());
    }

    #[test]
    fn importance_override_applies_to_next_simulation() {
        let shared = SharedGraph::default();
        shared
            .reload(&config(vec![Service::new("pay").with_business_process("Checkout")]))
            .unwrap();

        assert_eq!(shared.set_process_importance("Checkout", 10).unwrap(), 10);
        let result = shared.simulate(&["pay"], false).unwrap();

        assert!((result.total_impact_score - 300.0).abs() < 1e-9);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let shared = chain();
        let writer = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("poison");
        })
        .join();

        assert!(matches!(shared.read(|g| g.len()), Err(Error::LockPoisoned)));
    }
}
