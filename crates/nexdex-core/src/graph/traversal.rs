//! Reachability and shortest-path queries.
//!
//! All traversals are breadth-first over successor edges with a visited set,
//! so they terminate on cyclic graphs and never report a service twice.

use super::DependencyGraph;
use petgraph::graph::NodeIndex;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

impl DependencyGraph {
    /// Every service affected if `name` fails: the forward-reachable set.
    ///
    /// `name` itself is never included, even when a cycle leads back to it.
    /// Unknown names yield an empty set.
    #[must_use]
    pub fn get_all_dependents(&self, name: &str) -> BTreeSet<String> {
        let Some(&start) = self.node_map.get(name) else {
            return BTreeSet::new();
        };

        self.reachable_from(start)
            .into_iter()
            .map(|(node, _)| self.graph[node].clone())
            .collect()
    }

    /// Shortest cascade depth from `name` to every service it reaches.
    ///
    /// Ordered by depth, then by name. Like
    /// [`get_all_dependents`](Self::get_all_dependents), `name` itself is
    /// excluded.
    #[must_use]
    pub fn get_cascade_depths(&self, name: &str) -> Vec<(String, usize)> {
        let Some(&start) = self.node_map.get(name) else {
            return Vec::new();
        };

        let mut depths: Vec<(String, usize)> = self
            .reachable_from(start)
            .into_iter()
            .map(|(node, depth)| (self.graph[node].clone(), depth))
            .collect();
        depths.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        depths
    }

    /// BFS from `start`, returning each reached node (other than `start`)
    /// with its hop count.
    fn reachable_from(&self, start: NodeIndex) -> Vec<(NodeIndex, usize)> {
        let mut reached = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            for next in self.sorted_successors(current) {
                if visited.insert(next) {
                    reached.push((next, depth + 1));
                    queue.push_back((next, depth + 1));
                }
            }
        }

        tracing::trace!(
            from = %self.graph[start],
            reached = reached.len(),
            "Computed reachable dependents"
        );
        reached
    }

    /// Shortest directed path from `from` to `to`, both endpoints included.
    ///
    /// Returns `None` if either service is unknown or `to` is unreachable.
    /// A service's path to itself is `[from]`.
    ///
    /// Among equally short paths the lexicographically smallest sequence of
    /// names is returned: successors are explored in name order and the
    /// first discovered parent of each node is kept.
    #[must_use]
    pub fn get_cascade_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let &start = self.node_map.get(from)?;
        let &target = self.node_map.get(to)?;

        if start == target {
            return Some(vec![from.to_string()]);
        }

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.sorted_successors(current) {
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, current);
                if next == target {
                    return Some(self.unwind_path(&parent, start, target));
                }
                queue.push_back(next);
            }
        }

        None
    }

    fn unwind_path(
        &self,
        parent: &HashMap<NodeIndex, NodeIndex>,
        start: NodeIndex,
        target: NodeIndex,
    ) -> Vec<String> {
        let mut path = vec![self.graph[target].clone()];
        let mut current = target;
        while current != start {
            let Some(&prev) = parent.get(&current) else {
                break;
            };
            path.push(self.graph[prev].clone());
            current = prev;
        }
        path.reverse();
        path
    }

    /// Number of hops on the shortest path from `from` to `to`.
    ///
    /// `None` when `to` is not reachable from `from`.
    #[must_use]
    pub fn get_cascade_depth(&self, from: &str, to: &str) -> Option<usize> {
        self.get_cascade_path(from, to).map(|path| path.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Service;
    use crate::graph::DependencyGraph;

    fn graph_of(services: Vec<Service>) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for service in services {
            graph.add_service(service).unwrap();
        }
        graph
    }

    /// ```text
    ///      a
    ///     / \
    ///    b   c
    ///     \ /
    ///      d
    ///      |
    ///      e
    /// ```
    fn diamond() -> DependencyGraph {
        graph_of(vec![
            Service::new("a"),
            Service::new("b").with_depends_on(["a"]),
            Service::new("c").with_depends_on(["a"]),
            Service::new("d").with_depends_on(["c", "b"]),
            Service::new("e").with_depends_on(["d"]),
        ])
    }

    #[test]
    fn all_dependents_of_diamond() {
        let graph = diamond();

        let names: Vec<_> = graph.get_all_dependents("a").into_iter().collect();
        assert_eq!(names, vec!["b", "c", "d", "e"]);
        assert!(graph.get_all_dependents("e").is_empty());
        assert!(graph.get_all_dependents("missing").is_empty());
    }

    #[test]
    fn cascade_depths_are_shortest() {
        let graph = diamond();

        assert_eq!(
            graph.get_cascade_depths("a"),
            vec![
                ("b".to_string(), 1),
                ("c".to_string(), 1),
                ("d".to_string(), 2),
                ("e".to_string(), 3),
            ]
        );
    }

    #[test]
    fn path_tie_break_is_lexicographic() {
        let graph = diamond();

        assert_eq!(
            graph.get_cascade_path("a", "e"),
            Some(vec![
                "a".to_string(),
                "b".to_string(),
                "d".to_string(),
                "e".to_string()
            ])
        );
    }

    #[test]
    fn path_to_self_and_unreachable() {
        let graph = diamond();

        assert_eq!(graph.get_cascade_path("b", "b"), Some(vec!["b".to_string()]));
        assert_eq!(graph.get_cascade_depth("b", "b"), Some(0));
        assert_eq!(graph.get_cascade_path("e", "a"), None);
        assert_eq!(graph.get_cascade_depth("e", "a"), None);
        assert_eq!(graph.get_cascade_depth("a", "missing"), None);
    }

    #[test]
    fn cycle_back_to_start_is_excluded() {
        let graph = graph_of(vec![
            Service::new("x").with_depends_on(["y"]),
            Service::new("y").with_depends_on(["x"]),
            Service::new("z").with_depends_on(["y"]),
        ]);

        let from_x: Vec<_> = graph.get_all_dependents("x").into_iter().collect();
        assert_eq!(from_x, vec!["y", "z"]);
        assert!(graph.get_all_dependents("z").is_empty());
    }

    #[test]
    fn self_loop_has_no_dependents() {
        let graph = graph_of(vec![Service::new("s").with_depends_on(["s"])]);

        assert!(graph.get_all_dependents("s").is_empty());
        assert!(graph.get_cascade_depths("s").is_empty());
        assert_eq!(graph.get_dependents("s"), vec!["s"]);
    }
}
