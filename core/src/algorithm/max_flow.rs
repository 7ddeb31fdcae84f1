//! Maximum flow via the augmenting-path method
//!
//! This module implements the Ford-Fulkerson method in its depth-first
//! variant: repeatedly find an augmenting path in the residual graph, push
//! the bottleneck amount along it, and stop when no path remains. The search
//! takes the first path it finds in per-vertex edge insertion order, not the
//! shortest one, and excludes reused edges within a path but not reused
//! vertices, so non-simple paths are permitted.
//!
//! With integral capacities every augmentation strictly increases the total
//! flow, which is bounded by the capacity leaving the source, so the loop
//! terminates. The classical non-termination of this method on irrational
//! capacities cannot arise here.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::data_structures::network::{EdgeId, Flow, FlowError, FlowNetwork};

/// Operation counters for a single solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Augmenting paths found and applied
    pub augmentations: usize,
    /// Residual edges examined across all path searches
    pub edges_examined: usize,
}

/// Augmenting-path maximum flow solver
///
/// Purely sequential: each path search completes before the flow update
/// runs, and each update completes before the next search, because residual
/// capacities feed the next search's branching. The solver mutates only the
/// network's flow assignment; topology and capacities are never touched.
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    /// Creates a solver with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the most recent [`MaxFlowSolver::max_flow`] call
    pub fn metrics(&self) -> FlowMetrics {
        self.metrics
    }

    /// Computes the maximum flow from `source` to `sink`
    ///
    /// Augments until the residual graph admits no further path, then
    /// returns the sum of flow over the edges leaving `source`. Between any
    /// two iterations the flow assignment is internally consistent, so a
    /// caller imposing an external deadline may abort there safely. Fails
    /// with [`FlowError::UnknownVertex`] if either endpoint was never
    /// registered.
    pub fn max_flow<V>(
        &mut self,
        network: &mut FlowNetwork<V>,
        source: &V,
        sink: &V,
    ) -> Result<Flow, FlowError>
    where
        V: Clone + Eq + Hash + fmt::Debug,
    {
        network.edges_from(source)?;
        network.edges_from(sink)?;
        self.metrics = FlowMetrics::default();

        while let Some(path) = self.find_augmenting_path(network, source, sink) {
            // A zero-length path means source == sink; no bottleneck is
            // definable over zero edges and no flow can be pushed.
            let bottleneck = match path
                .iter()
                .map(|&id| network.residual_capacity(id))
                .min()
            {
                Some(bottleneck) => bottleneck,
                None => break,
            };

            for &id in &path {
                network.add_flow(id, bottleneck);
            }
            self.metrics.augmentations += 1;
            debug!(
                "augmentation {}: pushed {} along {} edge(s)",
                self.metrics.augmentations,
                bottleneck,
                path.len()
            );
        }

        network.outgoing_flow(source)
    }

    /// Depth-first search for an augmenting path in the residual graph
    ///
    /// Walks outgoing edges in insertion order, skipping any edge whose
    /// residual capacity is exhausted or that already sits on the current
    /// path, and returns the first edge sequence reaching `sink`. `None`
    /// means no path exists, which is normal termination for the caller,
    /// not an error; `source == sink` yields an empty path, distinct from
    /// absence. The traversal uses an explicit frame stack with a mutable
    /// path buffer rather than recursion, so deep networks cannot overflow
    /// the call stack.
    pub fn find_augmenting_path<V>(
        &mut self,
        network: &FlowNetwork<V>,
        source: &V,
        sink: &V,
    ) -> Option<Vec<EdgeId>>
    where
        V: Clone + Eq + Hash + fmt::Debug,
    {
        if source == sink {
            return Some(Vec::new());
        }

        let mut path: Vec<EdgeId> = Vec::new();
        // Membership is scoped to the current path only; edges freed by
        // backtracking may be taken again on a later branch, and every new
        // search starts from scratch.
        let mut on_path: HashSet<EdgeId> = HashSet::new();
        // Each frame is (vertex, index of the next outgoing edge to scan).
        let mut stack: Vec<(V, usize)> = vec![(source.clone(), 0)];

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let (vertex, start) = {
                let frame = &stack[top];
                (frame.0.clone(), frame.1)
            };
            let outgoing = match network.edges_from(&vertex) {
                Ok(outgoing) => outgoing,
                Err(_) => return None,
            };

            let mut descended = false;
            for index in start..outgoing.len() {
                let id = outgoing[index];
                self.metrics.edges_examined += 1;
                if network.residual_capacity(id) <= 0 || on_path.contains(&id) {
                    continue;
                }

                stack[top].1 = index + 1;
                path.push(id);
                on_path.insert(id);

                let next = network.edge(id).sink.clone();
                if next == *sink {
                    trace!("augmenting path found with {} edge(s)", path.len());
                    return Some(path);
                }
                stack.push((next, 0));
                descended = true;
                break;
            }

            if !descended {
                stack.pop();
                if let Some(id) = path.pop() {
                    on_path.remove(&id);
                }
            }
        }

        trace!("no augmenting path from {source:?} to {sink:?}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::network::{Capacity, FlowNetwork};

    fn network_from(edges: &[(&'static str, &'static str, Capacity)]) -> FlowNetwork<&'static str> {
        let mut network = FlowNetwork::new();
        for &(u, v, _) in edges {
            network.add_vertex(u);
            network.add_vertex(v);
        }
        for &(u, v, capacity) in edges {
            network.add_edge(u, v, capacity).unwrap();
        }
        network
    }

    fn assert_flow_invariants(network: &FlowNetwork<&'static str>) {
        for id in network.edge_ids() {
            let edge = network.edge(id);
            let reverse = network.edge(edge.reverse());
            assert!(
                edge.flow() <= edge.capacity(),
                "flow exceeds capacity on {:?}->{:?}",
                edge.source,
                edge.sink
            );
            assert_eq!(edge.flow(), -reverse.flow());
        }
        // One half of every pair carries the non-negative direction.
        for id in network.edge_ids() {
            let edge = network.edge(id);
            if edge.capacity() > 0 {
                assert!(edge.flow() >= 0);
            }
        }
    }

    #[test]
    fn test_single_edge() {
        let mut network = network_from(&[("s", "t", 10)]);
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut network, &"s", &"t").unwrap(), 10);
        assert_eq!(solver.metrics().augmentations, 1);
        assert_flow_invariants(&network);
    }

    #[test]
    fn test_two_parallel_paths() {
        let mut network = network_from(&[
            ("s", "a", 5),
            ("a", "t", 5),
            ("s", "b", 3),
            ("b", "t", 3),
        ]);
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut network, &"s", &"t").unwrap(), 8);
        assert_flow_invariants(&network);
    }

    #[test]
    fn test_bottleneck_cut_bounds_flow() {
        // A cut of capacity 4 separates s from t regardless of the wide
        // edges on either side.
        let mut network = network_from(&[
            ("s", "a", 100),
            ("s", "b", 100),
            ("a", "m", 3),
            ("b", "m", 1),
            ("m", "t", 100),
        ]);
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut network, &"s", &"t").unwrap(), 4);
        assert_flow_invariants(&network);
    }

    #[test]
    fn test_disconnected_sink() {
        let mut network = network_from(&[("s", "a", 10), ("b", "t", 5)]);
        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut network, &"s", &"t").unwrap(), 0);
        assert_eq!(solver.metrics().augmentations, 0);
    }

    #[test]
    fn test_residual_back_edges_reroute_flow() {
        // The classical six-vertex instance whose optimum requires undoing
        // flow across the 4->3 edge; total is 19.
        let mut network: FlowNetwork<u32> = FlowNetwork::new();
        for v in 0..6 {
            network.add_vertex(v);
        }
        for &(u, v, capacity) in &[
            (0, 1, 10),
            (0, 2, 10),
            (1, 3, 4),
            (1, 4, 8),
            (2, 4, 9),
            (3, 5, 10),
            (4, 3, 6),
            (4, 5, 10),
        ] {
            network.add_edge(u, v, capacity).unwrap();
        }

        let mut solver = MaxFlowSolver::new();
        assert_eq!(solver.max_flow(&mut network, &0, &5).unwrap(), 19);
    }

    #[test]
    fn test_flow_bounded_by_source_and_sink_capacity() {
        let edges: &[(&str, &str, Capacity)] = &[
            ("s", "a", 7),
            ("s", "b", 2),
            ("a", "t", 4),
            ("b", "t", 9),
            ("a", "b", 3),
        ];
        let mut network = network_from(edges);
        let source_out: Capacity = edges
            .iter()
            .filter(|(u, _, _)| *u == "s")
            .map(|(_, _, c)| c)
            .sum();
        let sink_in: Capacity = edges
            .iter()
            .filter(|(_, v, _)| *v == "t")
            .map(|(_, _, c)| c)
            .sum();

        let mut solver = MaxFlowSolver::new();
        let total = solver.max_flow(&mut network, &"s", &"t").unwrap();
        assert!(total <= source_out);
        assert!(total <= sink_in);
        assert_flow_invariants(&network);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut network = network_from(&[
            ("s", "a", 5),
            ("a", "t", 5),
            ("s", "b", 3),
            ("b", "t", 3),
        ]);
        let mut solver = MaxFlowSolver::new();
        let first = solver.max_flow(&mut network, &"s", &"t").unwrap();

        // The network is already maximal: same total, zero augmentations.
        let second = solver.max_flow(&mut network, &"s", &"t").unwrap();
        assert_eq!(first, second);
        assert_eq!(solver.metrics().augmentations, 0);
    }

    #[test]
    fn test_parallel_edge_order_does_not_change_total() {
        let forward_order = &[("s", "t", 3), ("s", "t", 7)];
        let reversed_order = &[("s", "t", 7), ("s", "t", 3)];

        let mut totals = Vec::new();
        for edges in [forward_order, reversed_order] {
            let mut network = network_from(edges.as_slice());
            let mut solver = MaxFlowSolver::new();
            totals.push(solver.max_flow(&mut network, &"s", &"t").unwrap());
        }
        assert_eq!(totals[0], 10);
        assert_eq!(totals[0], totals[1]);
    }

    #[test]
    fn test_unknown_endpoint_is_an_error() {
        let mut network = network_from(&[("s", "a", 1)]);
        let mut solver = MaxFlowSolver::new();
        assert!(matches!(
            solver.max_flow(&mut network, &"s", &"t"),
            Err(FlowError::UnknownVertex(_))
        ));
        assert!(matches!(
            solver.max_flow(&mut network, &"x", &"a"),
            Err(FlowError::UnknownVertex(_))
        ));
    }

    #[test]
    fn test_source_equals_sink_yields_empty_path() {
        let network = network_from(&[("s", "a", 1)]);
        let mut solver = MaxFlowSolver::new();
        let path = solver.find_augmenting_path(&network, &"s", &"s");
        assert_eq!(path, Some(Vec::new()));

        let mut network = network;
        assert_eq!(solver.max_flow(&mut network, &"s", &"s").unwrap(), 0);
    }

    #[test]
    fn test_path_search_leaves_flows_untouched() {
        let network = network_from(&[("s", "a", 2), ("a", "t", 2)]);
        let mut solver = MaxFlowSolver::new();
        let path = solver.find_augmenting_path(&network, &"s", &"t").unwrap();
        assert_eq!(path.len(), 2);
        for id in network.edge_ids() {
            assert_eq!(network.edge(id).flow(), 0);
        }
    }

    #[test]
    fn test_search_follows_insertion_order() {
        // Two parallel s->t edges: the first-inserted one is saturated first.
        let mut network = network_from(&[("s", "t", 3), ("s", "t", 7)]);
        let mut solver = MaxFlowSolver::new();
        let first = network.edges_from(&"s").unwrap()[0];

        let path = solver.find_augmenting_path(&network, &"s", &"t").unwrap();
        assert_eq!(path, vec![first]);

        solver.max_flow(&mut network, &"s", &"t").unwrap();
        assert_eq!(network.edge(first).flow(), 3);
    }
}
