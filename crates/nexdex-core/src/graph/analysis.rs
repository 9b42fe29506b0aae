//! Whole-graph analysis: criticality ranking, validation, statistics.

use super::{CriticalService, DependencyGraph, GraphStats};

/// How many services `get_graph_stats` lists as most critical.
const TOP_CRITICAL: usize = 5;

impl DependencyGraph {
    /// Every service ranked by how many services its failure reaches.
    ///
    /// Sorted by dependent count descending, then by name.
    #[must_use]
    pub fn get_critical_services(&self) -> Vec<CriticalService> {
        let mut ranked: Vec<CriticalService> = self
            .services
            .keys()
            .map(|name| CriticalService {
                name: name.clone(),
                dependent_count: self.get_all_dependents(name).len(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.dependent_count
                .cmp(&a.dependent_count)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }

    /// One message per dependency on a service that was never defined.
    ///
    /// Dangling references are reported here rather than failing the load.
    #[must_use]
    pub fn validate_dependencies(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for service in self.services() {
            for dep in &service.depends_on {
                if self.placeholders.contains(dep) {
                    errors.push(format!(
                        "Service '{}' depends on non-existent service '{dep}'",
                        service.name
                    ));
                }
            }
        }
        errors
    }

    /// Aggregate counts for the current graph.
    #[must_use]
    pub fn get_graph_stats(&self) -> GraphStats {
        let isolated_services = self
            .graph
            .node_indices()
            .filter(|&node| self.graph.neighbors_undirected(node).next().is_none())
            .count();

        let mut most_critical = self.get_critical_services();
        most_critical.truncate(TOP_CRITICAL);

        GraphStats {
            total_services: self.services.len(),
            total_dependencies: self.graph.edge_count(),
            circular_dependencies: self.detect_circular_dependencies().len(),
            isolated_services,
            most_critical,
        }
    }
}
