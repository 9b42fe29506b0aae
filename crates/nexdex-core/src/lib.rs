//! NexDex core - service dependency graph engine and failure simulator.
//!
//! This crate models a directed graph of service dependencies, simulates
//! the failure of one or more services, and scores the business impact that
//! propagates along dependency edges.
//!
//! - [`domain`]: plain records (`Service`, `ImpactResult`, `SimulationResult`, `Scenario`)
//! - [`config`]: the serialized graph definition (JSON or YAML)
//! - [`graph`]: the [`DependencyGraph`] and its structural queries
//! - [`simulation`]: the [`SimulationEngine`] and result comparison
//! - [`shared`]: a reader/writer-locked handle for concurrent callers
//!
//! # Example
//!
//! ```
//! use nexdex_core::{DependencyGraph, GraphConfig, SimulationEngine};
//!
//! let config: GraphConfig = serde_json::from_str(r#"{
//!     "services": [
//!         { "name": "db" },
//!         { "name": "api", "depends_on": ["db"] }
//!     ]
//! }"#).unwrap();
//!
//! let mut graph = DependencyGraph::new();
//! graph.load(&config).unwrap();
//!
//! let engine = SimulationEngine::new(&graph);
//! let result = engine.simulate_failure(&["db"], false).unwrap();
//! assert_eq!(result.total_services_affected, 2);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod shared;
pub mod simulation;

pub use config::{ConfigFormat, GraphConfig};
pub use domain::{ImpactResult, Scenario, Service, SimulationResult};
pub use error::{Error, Result};
pub use graph::{CriticalService, DependencyGraph, GraphStats};
pub use shared::SharedGraph;
pub use simulation::{
    ImpactSummary, ResultComparison, SimulationEngine, WorseResult, PEAK_HOURS_MULTIPLIER,
};
