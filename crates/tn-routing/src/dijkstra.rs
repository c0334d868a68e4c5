//! Dijkstra's algorithm over effective road weights.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tn_core::NodeId;
use tn_network::RoadGraph;

use crate::router::{Algorithm, PlannedPath, Router, SearchTree};
use crate::{RoutingError, RoutingResult};

/// Binary-heap Dijkstra.  The default router.
///
/// Closed roads (`+inf`) are skipped.  A negative or NaN weight aborts the
/// search with [`RoutingError::AlgorithmFailure`], since the settled-node
/// invariant would no longer hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn single_source(&self, graph: &RoadGraph, source: NodeId) -> RoutingResult<SearchTree> {
        dijkstra(graph, source, None)
    }

    fn route(&self, graph: &RoadGraph, source: NodeId, target: NodeId) -> RoutingResult<PlannedPath> {
        Ok(dijkstra(graph, source, Some(target))?.path_to(graph, target))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap key with a total order over `f64`.
#[derive(Debug, Clone, Copy)]
struct Cost(f64);

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(graph: &RoadGraph, source: NodeId, target: Option<NodeId>) -> RoutingResult<SearchTree> {
    let mut tree = SearchTree::new(source, graph.node_count());

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), source)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if Some(node) == target {
            break;
        }

        // Skip stale heap entries.
        if cost > tree.dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let weight = graph.effective_weight(edge);
            if weight.is_nan() || weight < 0.0 {
                return Err(RoutingError::AlgorithmFailure {
                    algorithm: Algorithm::Dijkstra,
                    reason:    format!("edge {edge} has weight {weight}; weights must be non-negative"),
                });
            }
            if weight.is_infinite() {
                continue;
            }

            let neighbor = graph.edge_to(edge);
            let new_cost = cost + weight;
            if new_cost < tree.dist[neighbor.index()] {
                tree.dist[neighbor.index()] = new_cost;
                tree.prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Ok(tree)
}
