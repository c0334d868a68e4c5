//! Bellman-Ford single-source shortest paths.
//!
//! ```text
//! dist[source] = 0, dist[v] = inf otherwise
//! repeat V-1 times (stop early when nothing changes):
//!     for each open edge (u, v, w): dist[v] = min(dist[v], dist[u] + w)
//! one extra pass: any further relaxation means a negative cycle
//! ```
//!
//! Complexity O(V · E).  Road weights are never negative here, so the
//! negative-cycle branch only fires on a malformed graph.

use tn_core::NodeId;
use tn_network::RoadGraph;

use crate::router::{Algorithm, Router, SearchTree};
use crate::{RoutingError, RoutingResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFordRouter;

impl Router for BellmanFordRouter {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BellmanFord
    }

    fn single_source(&self, graph: &RoadGraph, source: NodeId) -> RoutingResult<SearchTree> {
        bellman_ford(graph, source)
    }
}

fn bellman_ford(graph: &RoadGraph, source: NodeId) -> RoutingResult<SearchTree> {
    let mut tree = SearchTree::new(source, graph.node_count());

    // Closed roads never relax anything; drop them up front.
    let mut edges = Vec::with_capacity(graph.edge_count());
    for e in graph.edges() {
        if e.effective_weight.is_nan() {
            return Err(RoutingError::AlgorithmFailure {
                algorithm: Algorithm::BellmanFord,
                reason:    format!("edge {} has NaN weight", e.id),
            });
        }
        if e.effective_weight.is_finite() {
            edges.push(e);
        }
    }

    for _ in 1..graph.node_count() {
        let mut updated = false;
        for e in &edges {
            let du = tree.dist[e.from.index()];
            if du.is_infinite() {
                continue;
            }
            let candidate = du + e.effective_weight;
            if candidate < tree.dist[e.to.index()] {
                tree.dist[e.to.index()] = candidate;
                tree.prev_edge[e.to.index()] = e.id;
                updated = true;
            }
        }
        if !updated {
            break;
        }
    }

    // V-th pass: negative cycle check.
    for e in &edges {
        let du = tree.dist[e.from.index()];
        if du.is_finite() && du + e.effective_weight < tree.dist[e.to.index()] {
            return Err(RoutingError::AlgorithmFailure {
                algorithm: Algorithm::BellmanFord,
                reason:    format!("negative cycle reachable through edge {}", e.id),
            });
        }
    }

    Ok(tree)
}
