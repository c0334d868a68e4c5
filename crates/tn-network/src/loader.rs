//! CSV road-network loader.
//!
//! # CSV format
//!
//! One row per directed road.  The `open` column is optional and defaults
//! to `true`.
//!
//! ```csv
//! from,to,base_weight,open
//! A,B,12,true
//! A,C,7,true
//! B,C,9,false
//! ```
//!
//! Nodes are created on first mention, in row order.  A repeated
//! `(from, to)` pair is rejected with [`NetworkError::DuplicateEdge`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{NetworkError, NetworkResult, RoadGraph};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    from:        String,
    to:          String,
    base_weight: f64,
    #[serde(default = "default_open")]
    open:        bool,
}

fn default_open() -> bool {
    true
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadGraph`] from a CSV file.
pub fn load_graph_csv(path: &Path) -> NetworkResult<RoadGraph> {
    let file = std::fs::File::open(path).map_err(NetworkError::Io)?;
    load_graph_reader(file)
}

/// Like [`load_graph_csv`] but accepts any `Read` source.
pub fn load_graph_reader<R: Read>(reader: R) -> NetworkResult<RoadGraph> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut graph = RoadGraph::new();

    for (line, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let row = result.map_err(|e| NetworkError::Parse(format!("row {}: {e}", line + 1)))?;
        let edge = graph.add_edge(&row.from, &row.to, row.base_weight)?;
        if !row.open {
            graph.set_edge_open(edge, false);
        }
    }

    Ok(graph)
}
