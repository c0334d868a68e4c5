//! Read-only session snapshots for rendering layers.
//!
//! A snapshot resolves ids to labels and replaces `+inf` with `None`, so it
//! can be handed to a renderer or serialized as JSON without knowing
//! anything about the graph's internals.

use std::fmt;

use tn_core::NodeId;
use tn_network::{CongestionBand, EdgeView, RoadGraph};

use crate::{Session, SessionObserver};

/// One road as a renderer sees it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeSnapshot {
    pub from:             String,
    pub to:               String,
    pub base_weight:      f64,
    pub open:             bool,
    pub congestion:       f64,
    /// `None` for a closed road.
    pub effective_weight: Option<f64>,
    pub band:             CongestionBand,
}

impl EdgeSnapshot {
    pub fn from_view(graph: &RoadGraph, view: &EdgeView) -> Self {
        Self {
            from:             graph.label(view.from).to_owned(),
            to:               graph.label(view.to).to_owned(),
            base_weight:      view.base_weight,
            open:             view.is_open,
            congestion:       view.congestion,
            effective_weight: view.effective_weight.is_finite().then_some(view.effective_weight),
            band:             CongestionBand::of(view),
        }
    }
}

/// Everything a renderer reads after an interaction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SessionSnapshot {
    pub step:      u64,
    pub algorithm: String,
    pub source:    Option<String>,
    pub target:    Option<String>,
    /// Node labels; empty when there is no path.
    pub path:      Vec<String>,
    /// `None` when there is no path.
    pub cost:      Option<f64>,
    pub cursor:    usize,
    pub vehicle:   Option<String>,
    pub edges:     Vec<EdgeSnapshot>,
}

impl SessionSnapshot {
    pub(crate) fn capture<O: SessionObserver>(session: &Session<O>) -> Self {
        let graph = session.graph();
        let label = |n: NodeId| graph.label(n).to_owned();
        let path = session.path();

        Self {
            step:      session.step(),
            algorithm: session.algorithm().to_string(),
            source:    session.route().map(|(s, _)| label(s)),
            target:    session.route().map(|(_, t)| label(t)),
            path:      path.nodes.iter().map(|&n| label(n)).collect(),
            cost:      path.cost.is_finite().then_some(path.cost),
            cursor:    session.cursor(),
            vehicle:   session.vehicle().map(label),
            edges:     graph.edges().map(|e| EdgeSnapshot::from_view(graph, &e)).collect(),
        }
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cost {
            Some(cost) => writeln!(f, "Shortest path: {} | cost: {cost:.2}", self.path.join(" -> "))?,
            None => writeln!(f, "No path found")?,
        }
        if let Some(v) = &self.vehicle {
            writeln!(f, "Vehicle at {v} (step {} of {})", self.cursor, self.path.len() - 1)?;
        }
        for e in &self.edges {
            let weight = e
                .effective_weight
                .map_or_else(|| "inf".to_owned(), |w| format!("{w:.2}"));
            writeln!(
                f,
                "  {:>3} -> {:<3} {:<8} congestion {:.3}  weight {:>7}",
                e.from,
                e.to,
                e.band.to_string(),
                e.congestion,
                weight,
            )?;
        }
        Ok(())
    }
}
