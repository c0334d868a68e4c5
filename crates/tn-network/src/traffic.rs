//! Congestion update rule and congestion bands.
//!
//! One call to [`update_traffic`] is one traffic pass: every open edge
//! either loads (it lies on the traveled path) or decays, then gets a fresh
//! effective weight.  Closed edges are skipped entirely and keep their
//! congestion level.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use tn_core::{EdgeId, NodeId, SimRng, TrafficConfig};

use crate::graph::{EdgeView, RoadGraph};

// ── TrafficPass ───────────────────────────────────────────────────────────────

/// Edge counts from one traffic pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficPass {
    /// Open edges on the traveled path (congestion increased).
    pub loaded:  usize,
    /// Open edges off the path (congestion decayed).
    pub decayed: usize,
    /// Closed edges (left untouched).
    pub closed:  usize,
}

/// Apply one traffic pass to `graph`.
///
/// `traveled` is the node sequence of the most recently traveled path; an
/// edge counts as traveled if its ordered pair appears as consecutive nodes.
/// An empty slice decays every open edge.
///
/// Fluctuation factors are drawn from `rng` in `EdgeId` order, one per open
/// edge, so a seeded `rng` makes the pass reproducible.
pub fn update_traffic(
    graph:    &mut RoadGraph,
    traveled: &[NodeId],
    config:   &TrafficConfig,
    rng:      &mut SimRng,
) -> TrafficPass {
    let used: HashSet<(NodeId, NodeId)> = traveled.windows(2).map(|w| (w[0], w[1])).collect();
    let mut pass = TrafficPass::default();

    for i in 0..graph.edge_count() {
        if !graph.edge_open[i] {
            pass.closed += 1;
            continue;
        }
        let edge = EdgeId(i as u32);
        let pair = (graph.edge_from(edge), graph.edge_to(edge));

        let congestion = graph.edge_congestion[i];
        let congestion = if used.contains(&pair) {
            pass.loaded += 1;
            (congestion + config.congestion_increment).min(1.0)
        } else {
            pass.decayed += 1;
            (congestion * config.congestion_decay).max(0.0)
        };

        let fluctuation = rng.uniform(config.fluctuation_min, config.fluctuation_max);
        graph.edge_congestion[i] = congestion;
        graph.edge_open_weight[i] =
            config.round_weight(graph.base_weight(edge) * fluctuation * (1.0 + congestion));
    }

    debug!(
        loaded  = pass.loaded,
        decayed = pass.decayed,
        closed  = pass.closed,
        "traffic pass"
    );
    pass
}

// ── CongestionBand ────────────────────────────────────────────────────────────

/// Coarse congestion class used when drawing a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CongestionBand {
    /// Congestion below 0.3.
    Free,
    /// Congestion in [0.3, 0.7).
    Moderate,
    /// Congestion of 0.7 or more.
    Heavy,
    /// The road is closed.
    Closed,
}

impl CongestionBand {
    pub const MODERATE_THRESHOLD: f64 = 0.3;
    pub const HEAVY_THRESHOLD:    f64 = 0.7;

    pub fn of(edge: &EdgeView) -> Self {
        if !edge.is_open {
            CongestionBand::Closed
        } else if edge.congestion < Self::MODERATE_THRESHOLD {
            CongestionBand::Free
        } else if edge.congestion < Self::HEAVY_THRESHOLD {
            CongestionBand::Moderate
        } else {
            CongestionBand::Heavy
        }
    }

    /// Conventional map color for the band.
    pub fn color(self) -> &'static str {
        match self {
            CongestionBand::Free     => "green",
            CongestionBand::Moderate => "orange",
            CongestionBand::Heavy    => "red",
            CongestionBand::Closed   => "black",
        }
    }
}

impl fmt::Display for CongestionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CongestionBand::Free     => "free",
            CongestionBand::Moderate => "moderate",
            CongestionBand::Heavy    => "heavy",
            CongestionBand::Closed   => "closed",
        };
        f.write_str(s)
    }
}
