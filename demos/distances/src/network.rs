//! The six-road network used by the distance-table demo.

use anyhow::Result;

use tn_core::SimRng;
use tn_network::RoadGraph;

/// Build the demo network with weights drawn uniformly from 2..=10.
///
/// A fresh network is generated on every run, like pressing "Run" again.
pub fn build_network(rng: &mut SimRng) -> Result<RoadGraph> {
    let roads = [
        ("A", "B"), ("A", "C"), ("B", "D"),
        ("C", "D"), ("D", "E"), ("B", "E"),
    ];
    let mut g = RoadGraph::new();
    for (from, to) in roads {
        g.add_edge(from, to, rng.gen_range(2..=10u32) as f64)?;
    }
    Ok(g)
}
