//! Service dependency graph backed by petgraph.
//!
//! # Architecture
//!
//! - `HashMap<String, Service>` for O(1) service lookups
//! - `petgraph::DiGraph` for the dependency edges
//! - `HashMap<String, NodeIndex>` mapping service names to graph nodes
//! - a set of placeholder names, i.e. services referenced as a dependency
//!   but never defined
//!
//! ## Edge Direction Convention
//!
//! Edges run from a **dependency to its dependent**: if `api` depends on
//! `db`, the edge is `db -> api`. Following outgoing edges therefore answers
//! "who is affected if this fails".
//!
//! ## Cycles
//!
//! Cycles are legal. Every traversal tracks a visited set, so queries
//! terminate on any graph.
//!
//! ## States
//!
//! A graph is either unloaded (every query returns an empty answer) or
//! loaded. [`DependencyGraph::load`] is destructive and atomic: the new
//! graph is built separately and swapped in only if every definition is
//! valid.

mod analysis;
mod cycles;
mod traversal;
mod types;

pub use types::{CriticalService, GraphStats};

use crate::config::{ConfigFormat, GraphConfig};
use crate::domain::{clamp_importance, Service};
use crate::error::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// The authoritative service dependency graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Services indexed by name, placeholders included.
    services: HashMap<String, Service>,

    /// Edge direction: source (dependency) -> target (dependent).
    graph: DiGraph<String, ()>,

    /// Every name in `services` has an entry here.
    node_map: HashMap<String, NodeIndex>,

    /// Names that were only ever referenced as a dependency.
    placeholders: HashSet<String>,

    /// Business process importance overrides, already clamped.
    process_importance: BTreeMap<String, u8>,

    loaded: bool,
}

impl DependencyGraph {
    /// Create an empty, unloaded graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the graph with the given definition.
    ///
    /// Registers the business process overrides, then inserts every service
    /// in order, creating placeholders for dependencies that have not been
    /// defined (yet). Dangling references do not fail the load; use
    /// [`validate_dependencies`](Self::validate_dependencies) to report them.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a definition is structurally invalid. The
    /// previous graph is left untouched in that case.
    pub fn load(&mut self, config: &GraphConfig) -> Result<()> {
        let mut fresh = Self::new();

        for (process, score) in &config.business_processes {
            fresh.set_process_importance(process.clone(), *score);
        }
        for service in &config.services {
            fresh.add_service(service.clone())?;
        }
        fresh.loaded = true;

        tracing::debug!(
            services = fresh.services.len(),
            placeholders = fresh.placeholders.len(),
            edges = fresh.graph.edge_count(),
            processes = fresh.process_importance.len(),
            "Loaded dependency graph"
        );

        *self = fresh;
        Ok(())
    }

    /// Parse a serialized definition and [`load`](Self::load) it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is malformed.
    pub fn load_from_str(&mut self, text: &str, format: ConfigFormat) -> Result<()> {
        let config = GraphConfig::parse(text, format)?;
        self.load(&config)
    }

    /// Read a definition file and [`load`](Self::load) it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config`
    /// if it is malformed.
    pub fn load_from_path(&mut self, path: &Path) -> Result<()> {
        let config = GraphConfig::load(path)?;
        self.load(&config)
    }

    /// Export the current graph as a definition.
    ///
    /// Placeholders are omitted; reloading the export recreates them, so
    /// dangling references survive the round trip. Services are sorted by name.
    #[must_use]
    pub fn to_config(&self) -> GraphConfig {
        GraphConfig {
            business_processes: self
                .process_importance
                .iter()
                .map(|(process, score)| (process.clone(), i64::from(*score)))
                .collect(),
            services: self
                .services()
                .into_iter()
                .filter(|service| !self.placeholders.contains(&service.name))
                .cloned()
                .collect(),
        }
    }

    /// Insert (or redefine) a service and wire its dependency edges.
    ///
    /// Edges are deduplicated by `(dependency, dependent)` pair. Redefining a
    /// service replaces its record but keeps edges added by earlier definitions.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the service fails structural validation.
    pub fn add_service(&mut self, service: Service) -> Result<()> {
        service.validate()?;

        let node = self.ensure_node(&service.name);
        for dep in &service.depends_on {
            if !self.services.contains_key(dep) {
                tracing::debug!(
                    service = %service.name,
                    dependency = %dep,
                    "Creating placeholder for undefined dependency"
                );
                self.services.insert(dep.clone(), Service::new(dep.clone()));
                self.placeholders.insert(dep.clone());
            }
            let dep_node = self.ensure_node(dep);
            self.graph.update_edge(dep_node, node, ());
        }

        self.placeholders.remove(&service.name);
        self.services.insert(service.name.clone(), service);
        self.loaded = true;
        Ok(())
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.node_map.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), node);
        node
    }

    /// Whether a graph has been loaded (or built with [`add_service`](Self::add_service)).
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of services, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the graph has no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Number of dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a service with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Whether this service was only ever referenced, never defined.
    #[must_use]
    pub fn is_placeholder(&self, name: &str) -> bool {
        self.placeholders.contains(name)
    }

    /// Look up a service by name.
    #[must_use]
    pub fn get_service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// All services, sorted by name.
    #[must_use]
    pub fn services(&self) -> Vec<&Service> {
        let mut services: Vec<&Service> = self.services.values().collect();
        services.sort();
        services
    }

    /// Set the importance override for a business process.
    ///
    /// The score is clamped to 1-10; the stored value is returned.
    pub fn set_process_importance(&mut self, process: impl Into<String>, score: i64) -> u8 {
        let process = process.into();
        let clamped = clamp_importance(score);
        if i64::from(clamped) != score {
            tracing::warn!(
                process = %process,
                requested = score,
                stored = clamped,
                "Business process importance out of range, clamping"
            );
        }
        self.process_importance.insert(process, clamped);
        clamped
    }

    /// The importance override for a business process, if one is set.
    #[must_use]
    pub fn get_process_importance(&self, process: &str) -> Option<u8> {
        self.process_importance.get(process).copied()
    }

    /// All business process overrides.
    #[must_use]
    pub fn process_importances(&self) -> &BTreeMap<String, u8> {
        &self.process_importance
    }

    /// Importance used for scoring: the process override if present,
    /// otherwise the service's own importance, clamped to 1-10.
    #[must_use]
    pub fn effective_importance(&self, service: &Service) -> u8 {
        service
            .process()
            .and_then(|process| self.get_process_importance(process))
            .unwrap_or_else(|| clamp_importance(service.importance))
    }

    /// Names this service directly depends on, in declaration order.
    ///
    /// Empty if the service is unknown.
    #[must_use]
    pub fn get_dependencies(&self, name: &str) -> Vec<String> {
        self.services
            .get(name)
            .map(|service| service.depends_on.clone())
            .unwrap_or_default()
    }

    /// Services that directly depend on this one, sorted by name.
    ///
    /// Empty if the service is unknown.
    #[must_use]
    pub fn get_dependents(&self, name: &str) -> Vec<String> {
        self.node_map
            .get(name)
            .map(|&node| {
                self.sorted_successors(node)
                    .into_iter()
                    .map(|n| self.graph[n].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Direct successors of a node, ordered by service name.
    ///
    /// Every traversal walks successors in this order, which is what makes
    /// path tie-breaking and cycle output deterministic.
    fn sorted_successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        successors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        successors.dedup();
        successors
    }
}
