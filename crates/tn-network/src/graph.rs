//! Mutable directed road graph.
//!
//! # Data layout
//!
//! Nodes and edges are stored column-wise, indexed by `NodeId` / `EdgeId`
//! (both assigned sequentially in insertion order).  Per-node outgoing
//! edge lists give the routers a cheap adjacency scan:
//!
//! ```text
//! node_out[n] = [EdgeId, …]   edges leaving node n, in insertion order
//! ```
//!
//! Topology and base weights are fixed once an edge is added.  Only the
//! traffic columns (`edge_open`, `edge_congestion`, `edge_open_weight`)
//! change afterwards, through [`RoadGraph::set_open`] and
//! [`crate::update_traffic`].
//!
//! # Effective weight
//!
//! `edge_open_weight` holds the last derived weight
//! `round(base * fluctuation * (1 + congestion))`.  The effective weight
//! seen by routers is that value for an open edge and `+inf` for a closed
//! one, so a closed road can never carry a finite cost.

use std::collections::HashMap;

use tracing::debug;

use tn_core::{EdgeId, NodeId};

use crate::{NetworkError, NetworkResult};

// ── EdgeView ──────────────────────────────────────────────────────────────────

/// Read-only copy of one edge's attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeView {
    pub id:               EdgeId,
    pub from:             NodeId,
    pub to:               NodeId,
    pub base_weight:      f64,
    pub is_open:          bool,
    pub congestion:       f64,
    /// `+inf` when `is_open` is false.
    pub effective_weight: f64,
}

// ── TrafficState ──────────────────────────────────────────────────────────────

/// Saved copy of every edge's mutable traffic columns.
///
/// Captured before a traffic pass so a caller can roll the graph back when
/// a later step of the same interaction fails.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficState {
    open:        Vec<bool>,
    congestion:  Vec<f64>,
    open_weight: Vec<f64>,
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph with per-edge congestion state.
///
/// Owned by exactly one session; there is no interior mutability and no
/// global instance.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    node_label:  Vec<String>,
    label_index: HashMap<String, NodeId>,
    node_out:    Vec<Vec<EdgeId>>,

    // ── Edge topology (immutable after insertion) ─────────────────────────
    edge_from:        Vec<NodeId>,
    edge_to:          Vec<NodeId>,
    edge_base_weight: Vec<f64>,
    pair_index:       HashMap<(NodeId, NodeId), EdgeId>,

    // ── Edge traffic state ────────────────────────────────────────────────
    pub(crate) edge_open:        Vec<bool>,
    pub(crate) edge_congestion:  Vec<f64>,
    pub(crate) edge_open_weight: Vec<f64>,
}

impl RoadGraph {
    /// Largest accepted base weight.
    ///
    /// With fluctuation capped at [`TrafficConfig::MAX_FLUCTUATION`] and
    /// congestion at 1.0, a derived weight stays below `2e10`, so effective
    /// weights and path sums over any `u32`-indexed graph remain finite.
    ///
    /// [`TrafficConfig::MAX_FLUCTUATION`]: tn_core::TrafficConfig::MAX_FLUCTUATION
    pub const MAX_BASE_WEIGHT: f64 = 1e9;

    pub fn new() -> Self {
        Self::default()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_label.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_label.is_empty()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a node labelled `label`, or return the existing id if the label
    /// is already present.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.label_index.get(label) {
            return id;
        }
        let id = NodeId(self.node_label.len() as u32);
        self.node_label.push(label.to_owned());
        self.label_index.insert(label.to_owned(), id);
        self.node_out.push(Vec::new());
        id
    }

    /// Add a **directed** road from `from` to `to`, creating either endpoint
    /// if needed.
    ///
    /// The new edge is open, uncongested, and its effective weight equals
    /// `base_weight` until the first traffic pass.  An ordered pair can only
    /// be added once: a second `add_edge` for the same pair fails with
    /// [`NetworkError::DuplicateEdge`] and leaves the original untouched.
    /// `base_weight` must lie in `(0, MAX_BASE_WEIGHT]`.
    pub fn add_edge(&mut self, from: &str, to: &str, base_weight: f64) -> NetworkResult<EdgeId> {
        if !(base_weight > 0.0 && base_weight <= Self::MAX_BASE_WEIGHT) {
            return Err(NetworkError::InvalidWeight {
                from:   from.to_owned(),
                to:     to.to_owned(),
                weight: base_weight,
            });
        }
        if let (Some(&u), Some(&v)) = (self.label_index.get(from), self.label_index.get(to)) {
            if self.pair_index.contains_key(&(u, v)) {
                return Err(NetworkError::DuplicateEdge {
                    from: from.to_owned(),
                    to:   to.to_owned(),
                });
            }
        }

        let u = self.add_node(from);
        let v = self.add_node(to);
        let id = EdgeId(self.edge_to.len() as u32);

        self.edge_from.push(u);
        self.edge_to.push(v);
        self.edge_base_weight.push(base_weight);
        self.edge_open.push(true);
        self.edge_congestion.push(0.0);
        self.edge_open_weight.push(base_weight);
        self.pair_index.insert((u, v), id);
        self.node_out[u.index()].push(id);
        Ok(id)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Resolve a node label.
    pub fn node_id(&self, label: &str) -> NetworkResult<NodeId> {
        self.label_index
            .get(label)
            .copied()
            .ok_or_else(|| NetworkError::NodeNotFound(label.to_owned()))
    }

    /// Label of `node`.
    ///
    /// # Panics
    /// Panics if `node` is not part of this graph.
    pub fn label(&self, node: NodeId) -> &str {
        &self.node_label[node.index()]
    }

    /// All node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + Clone + '_ {
        (0..self.node_count()).map(|i| NodeId(i as u32))
    }

    /// The edge for the ordered pair `(from, to)`, if any.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.pair_index.get(&(from, to)).copied()
    }

    /// Outgoing edges of `node`, in insertion order.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.node_out[node.index()].iter().copied()
    }

    #[inline]
    pub fn edge_from(&self, edge: EdgeId) -> NodeId {
        self.edge_from[edge.index()]
    }

    #[inline]
    pub fn edge_to(&self, edge: EdgeId) -> NodeId {
        self.edge_to[edge.index()]
    }

    /// Cost used by the routers: the derived weight when open, `+inf` when
    /// closed.
    #[inline]
    pub fn effective_weight(&self, edge: EdgeId) -> f64 {
        let i = edge.index();
        if self.edge_open[i] { self.edge_open_weight[i] } else { f64::INFINITY }
    }

    pub fn edge(&self, edge: EdgeId) -> EdgeView {
        let i = edge.index();
        EdgeView {
            id:               edge,
            from:             self.edge_from[i],
            to:               self.edge_to[i],
            base_weight:      self.edge_base_weight[i],
            is_open:          self.edge_open[i],
            congestion:       self.edge_congestion[i],
            effective_weight: self.effective_weight(edge),
        }
    }

    /// Lazy view over every edge in `EdgeId` order.  Call again to restart.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView> + Clone + '_ {
        (0..self.edge_count()).map(|i| self.edge(EdgeId(i as u32)))
    }

    #[inline]
    pub(crate) fn base_weight(&self, edge: EdgeId) -> f64 {
        self.edge_base_weight[edge.index()]
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Open or close the road from `from` to `to`.
    ///
    /// Closing takes effect immediately: the edge's effective weight becomes
    /// `+inf` without waiting for a traffic pass.  Reopening restores the
    /// weight derived by the most recent pass.  Congestion is untouched.
    pub fn set_open(&mut self, from: &str, to: &str, open: bool) -> NetworkResult<EdgeId> {
        let not_found = || NetworkError::EdgeNotFound {
            from: from.to_owned(),
            to:   to.to_owned(),
        };
        let u = self.node_id(from).map_err(|_| not_found())?;
        let v = self.node_id(to).map_err(|_| not_found())?;
        let edge = self.find_edge(u, v).ok_or_else(not_found)?;
        self.set_edge_open(edge, open);
        Ok(edge)
    }

    /// Same as [`set_open`](Self::set_open) for an already-resolved edge.
    pub fn set_edge_open(&mut self, edge: EdgeId, open: bool) {
        let i = edge.index();
        if self.edge_open[i] != open {
            debug!(
                from = %self.node_label[self.edge_from[i].index()],
                to   = %self.node_label[self.edge_to[i].index()],
                open,
                "road toggled"
            );
        }
        self.edge_open[i] = open;
    }

    /// Snapshot the mutable traffic columns.
    pub fn traffic_state(&self) -> TrafficState {
        TrafficState {
            open:        self.edge_open.clone(),
            congestion:  self.edge_congestion.clone(),
            open_weight: self.edge_open_weight.clone(),
        }
    }

    /// Roll the traffic columns back to `state`.
    ///
    /// `state` must come from this graph; edges added after the capture keep
    /// their current values.
    pub fn restore_traffic_state(&mut self, state: &TrafficState) {
        let n = state.open.len().min(self.edge_count());
        self.edge_open[..n].copy_from_slice(&state.open[..n]);
        self.edge_congestion[..n].copy_from_slice(&state.congestion[..n]);
        self.edge_open_weight[..n].copy_from_slice(&state.open_weight[..n]);
    }

    // ── Fault injection ───────────────────────────────────────────────────

    /// Overwrite an edge's base weight, bypassing `add_edge` validation.
    #[cfg(any(test, feature = "test-util"))]
    pub fn force_base_weight(&mut self, edge: EdgeId, weight: f64) {
        self.edge_base_weight[edge.index()] = weight;
    }

    /// Overwrite an edge's derived open weight, bypassing the traffic rule.
    #[cfg(any(test, feature = "test-util"))]
    pub fn force_open_weight(&mut self, edge: EdgeId, weight: f64) {
        self.edge_open_weight[edge.index()] = weight;
    }
}
