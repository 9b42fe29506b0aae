//! Elementary cycle enumeration.
//!
//! For each service `s`, in name order, an explicit-stack DFS looks for
//! simple paths that return to `s` while only visiting services that sort
//! after `s` and share its strongly connected component. Each elementary
//! cycle is therefore found exactly once, starting at its smallest name.
//!
//! The number of elementary cycles can grow exponentially with graph
//! density. This is fine for the tens-to-hundreds of services a dependency
//! map usually holds; results are never truncated.

use super::DependencyGraph;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet};

struct Frame {
    successors: Vec<NodeIndex>,
    cursor: usize,
}

impl DependencyGraph {
    /// Every elementary cycle in the graph.
    ///
    /// Each cycle is listed from its lexicographically smallest service and is
    /// implicitly closed back to that first element. The list itself is sorted.
    #[must_use]
    pub fn detect_circular_dependencies(&self) -> Vec<Vec<String>> {
        let mut order: Vec<NodeIndex> = self.graph.node_indices().collect();
        order.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        let rank: HashMap<NodeIndex, usize> =
            order.iter().enumerate().map(|(i, &node)| (node, i)).collect();

        let mut component: HashMap<NodeIndex, usize> = HashMap::new();
        for (id, scc) in tarjan_scc(&self.graph).into_iter().enumerate() {
            for node in scc {
                component.insert(node, id);
            }
        }

        let mut cycles = Vec::new();
        for &start in &order {
            self.cycles_from(start, &rank, &component, &mut cycles);
        }
        cycles.sort();

        tracing::debug!(count = cycles.len(), "Detected circular dependencies");
        cycles
    }

    fn cycles_from(
        &self,
        start: NodeIndex,
        rank: &HashMap<NodeIndex, usize>,
        component: &HashMap<NodeIndex, usize>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        let start_rank = rank[&start];
        let start_component = component[&start];
        let eligible =
            |node: NodeIndex| rank[&node] > start_rank && component[&node] == start_component;

        let mut path = vec![start];
        let mut on_path = HashSet::from([start]);
        let mut stack = vec![Frame {
            successors: self.sorted_successors(start),
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let next = frame.successors.get(frame.cursor).copied();
            frame.cursor += 1;
            let Some(next) = next else {
                stack.pop();
                if let Some(node) = path.pop() {
                    on_path.remove(&node);
                }
                continue;
            };

            if next == start {
                cycles.push(path.iter().map(|&n| self.graph[n].clone()).collect());
            } else if eligible(next) && on_path.insert(next) {
                path.push(next);
                stack.push(Frame {
                    successors: self.sorted_successors(next),
                    cursor: 0,
                });
            }
        }
    }
}
