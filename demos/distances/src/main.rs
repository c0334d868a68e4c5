//! distances: single-source distance table over a freshly weighted network.
//!
//! Every run draws new road weights (unless `--seed` is given), computes the
//! distance from the source to every intersection with the chosen algorithm,
//! and prints the roads and the table.  Unreachable intersections show `∞`.

mod network;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tn_core::SimRng;
use tn_routing::{Algorithm, distances};

use network::build_network;

#[derive(Parser, Debug)]
#[command(name = "distances")]
#[command(about = "Distance table from one intersection using Dijkstra or Bellman-Ford", long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
    algorithm: AlgorithmArg,

    #[arg(short, long, default_value = "A")]
    source: String,

    /// Seed for road weights.  Omit for a different network every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the table as a JSON object (unreachable nodes are `null`).
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    BellmanFord,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Dijkstra    => Algorithm::Dijkstra,
            AlgorithmArg::BellmanFord => Algorithm::BellmanFord,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let algorithm = Algorithm::from(args.algorithm);

    let mut rng = match args.seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };
    let graph = build_network(&mut rng)?;

    let source = graph.node_id(&args.source).map_err(|_| {
        let valid: Vec<&str> = graph.nodes().map(|n| graph.label(n)).collect();
        anyhow!(
            "source intersection `{}` not found; try one of {}",
            args.source,
            valid.join(", ")
        )
    })?;

    let table = distances(&graph, source, algorithm)?;
    info!(%algorithm, source = %args.source, reachable = table.len(), "distances computed");

    if args.json {
        let obj: serde_json::Map<String, serde_json::Value> = graph
            .nodes()
            .map(|n| (graph.label(n).to_owned(), table.get(&n).copied().into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }

    println!("Roads:");
    for e in graph.edges() {
        println!("  {} -> {}  {:>4}", graph.label(e.from), graph.label(e.to), e.base_weight);
    }
    println!();
    println!("Shortest distances from {} ({algorithm}):", args.source);
    println!("{:<6} {:>8}", "Node", "Distance");
    println!("{}", "-".repeat(15));
    for n in graph.nodes() {
        let d = table.get(&n).map_or_else(|| "∞".to_owned(), |d| d.to_string());
        println!("{:<6} {:>8}", graph.label(n), d);
    }

    Ok(())
}
