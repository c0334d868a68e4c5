//! The five-intersection road network used by the congestion demo.

use anyhow::Result;

use tn_core::SimRng;
use tn_network::RoadGraph;

/// Roads of the demo network, all one-way.
pub const ROADS: [(&str, &str); 7] = [
    ("A", "B"), ("A", "C"), ("B", "C"), ("B", "D"),
    ("C", "D"), ("C", "E"), ("D", "E"),
];

/// Build the demo network with base weights drawn uniformly from 5..=15.
pub fn build_network(rng: &mut SimRng) -> Result<RoadGraph> {
    let mut g = RoadGraph::new();
    for (from, to) in ROADS {
        let base = rng.gen_range(5..=15u32) as f64;
        g.add_edge(from, to, base)?;
    }
    Ok(g)
}
