//! Types returned by graph queries.

use serde::Serialize;

/// A service ranked by how many services its failure reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalService {
    /// Service name.
    pub name: String,
    /// Number of transitively dependent services.
    pub dependent_count: usize,
}

/// Aggregate counts describing a loaded graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Number of services, placeholders included.
    pub total_services: usize,
    /// Number of dependency edges.
    pub total_dependencies: usize,
    /// Number of elementary cycles.
    pub circular_dependencies: usize,
    /// Services with no edges in either direction.
    pub isolated_services: usize,
    /// The five most critical services.
    pub most_critical: Vec<CriticalService>,
}
