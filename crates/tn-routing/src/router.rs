//! Routing trait, algorithm selection, and query results.
//!
//! # Pluggability
//!
//! Callers pick an algorithm through the closed [`Algorithm`] enum, which
//! dispatches to a concrete [`Router`].  Both routers produce the same
//! [`SearchTree`], so path extraction and distance tables do not depend on
//! which one ran.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use tn_core::{EdgeId, NodeId};
use tn_network::RoadGraph;

use crate::{BellmanFordRouter, DijkstraRouter, RoutingError, RoutingResult};

// ── PlannedPath ───────────────────────────────────────────────────────────────

/// The result of a point-to-point query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    /// Nodes from source to target inclusive.  Empty when unreachable.
    pub nodes: Vec<NodeId>,
    /// Sum of effective weights along `nodes`; `+inf` when unreachable.
    pub cost: f64,
}

impl PlannedPath {
    /// The "no path" outcome.
    pub fn unreachable() -> Self {
        Self { nodes: Vec::new(), cost: f64::INFINITY }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Ordered `(from, to)` pairs of consecutive nodes.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

// ── SearchTree ────────────────────────────────────────────────────────────────

/// Single-source shortest-path tree.
///
/// `dist[v]` is the best cost from `source` to `v` (`+inf` if unreached);
/// `prev_edge[v]` is the edge that reached `v`, `EdgeId::INVALID` for the
/// source and for unreached nodes.
#[derive(Debug, Clone)]
pub struct SearchTree {
    pub source:    NodeId,
    pub dist:      Vec<f64>,
    pub prev_edge: Vec<EdgeId>,
}

impl SearchTree {
    pub(crate) fn new(source: NodeId, node_count: usize) -> Self {
        let mut dist = vec![f64::INFINITY; node_count];
        dist[source.index()] = 0.0;
        Self {
            source,
            dist,
            prev_edge: vec![EdgeId::INVALID; node_count],
        }
    }

    pub fn distance(&self, node: NodeId) -> f64 {
        self.dist.get(node.index()).copied().unwrap_or(f64::INFINITY)
    }

    pub fn reaches(&self, node: NodeId) -> bool {
        self.distance(node).is_finite()
    }

    /// Distances of every reached node, keyed by id.
    pub fn reachable(&self) -> BTreeMap<NodeId, f64> {
        self.dist
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(i, &d)| (NodeId(i as u32), d))
            .collect()
    }

    /// Trace the tree back from `target`.
    ///
    /// The returned cost is re-summed along the extracted path so it always
    /// equals the sum of the path's effective weights.
    pub fn path_to(&self, graph: &RoadGraph, target: NodeId) -> PlannedPath {
        if !self.reaches(target) {
            return PlannedPath::unreachable();
        }

        let mut edges = Vec::new();
        let mut cur = target;
        loop {
            let e = self.prev_edge[cur.index()];
            if e == EdgeId::INVALID {
                break;
            }
            edges.push(e);
            cur = graph.edge_from(e);
        }
        edges.reverse();

        let mut nodes = Vec::with_capacity(edges.len() + 1);
        nodes.push(self.source);
        nodes.extend(edges.iter().map(|&e| graph.edge_to(e)));
        let cost = edges.iter().map(|&e| graph.effective_weight(e)).sum();
        PlannedPath { nodes, cost }
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// A shortest-path algorithm over effective road weights.
pub trait Router {
    /// Which [`Algorithm`] this router implements, for error reporting.
    fn algorithm(&self) -> Algorithm;

    /// Compute the shortest-path tree rooted at `source`.
    ///
    /// `source` has already been validated by the caller.
    fn single_source(&self, graph: &RoadGraph, source: NodeId) -> RoutingResult<SearchTree>;

    /// Shortest path from `source` to `target`.
    ///
    /// Implementations may stop early once `target` is settled.
    fn route(&self, graph: &RoadGraph, source: NodeId, target: NodeId) -> RoutingResult<PlannedPath> {
        Ok(self.single_source(graph, source)?.path_to(graph, target))
    }
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Closed set of supported algorithms.
///
/// Weights are never negative here, so both are correct; Dijkstra is the
/// default because it is cheaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    BellmanFord,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::BellmanFord];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra    => "dijkstra",
            Algorithm::BellmanFord => "bellman-ford",
        }
    }

    pub fn single_source(self, graph: &RoadGraph, source: NodeId) -> RoutingResult<SearchTree> {
        match self {
            Algorithm::Dijkstra    => DijkstraRouter.single_source(graph, source),
            Algorithm::BellmanFord => BellmanFordRouter.single_source(graph, source),
        }
    }

    pub fn route(self, graph: &RoadGraph, source: NodeId, target: NodeId) -> RoutingResult<PlannedPath> {
        match self {
            Algorithm::Dijkstra    => DijkstraRouter.route(graph, source, target),
            Algorithm::BellmanFord => BellmanFordRouter.route(graph, source, target),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bellman-ford" | "bellman_ford" | "bellmanford" => Ok(Algorithm::BellmanFord),
            other => Err(RoutingError::UnknownAlgorithm(other.to_owned())),
        }
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

fn check_node(graph: &RoadGraph, node: NodeId) -> RoutingResult<()> {
    if graph.contains_node(node) { Ok(()) } else { Err(RoutingError::NodeNotFound(node)) }
}

/// Shortest path from `source` to `target` under current effective weights.
///
/// Returns [`PlannedPath::unreachable`] when no open route exists.
/// `source == target` yields the single-node path with cost 0.
pub fn shortest_path(
    graph:     &RoadGraph,
    source:    NodeId,
    target:    NodeId,
    algorithm: Algorithm,
) -> RoutingResult<PlannedPath> {
    check_node(graph, source)?;
    check_node(graph, target)?;

    let path = algorithm.route(graph, source, target).inspect_err(|e| {
        warn!(%algorithm, error = %e, "shortest path query failed");
    })?;
    debug!(%algorithm, hops = path.len().saturating_sub(1), cost = path.cost, "shortest path");
    Ok(path)
}

/// Distance from `source` to every reachable node.
///
/// Unreachable nodes are absent from the map.
pub fn distances(
    graph:     &RoadGraph,
    source:    NodeId,
    algorithm: Algorithm,
) -> RoutingResult<BTreeMap<NodeId, f64>> {
    check_node(graph, source)?;
    let tree = algorithm.single_source(graph, source).inspect_err(|e| {
        warn!(%algorithm, error = %e, "distance query failed");
    })?;
    Ok(tree.reachable())
}
