//! congestion: drive one routing session from the command line.
//!
//! Builds the five-intersection demo network (or loads one from CSV), picks a
//! route, optionally reopens or closes roads, then moves the vehicle a few times while
//! traffic builds up along the path.  After every interaction the session
//! snapshot is printed as text or JSON.
//!
//! ```text
//! congestion --seed 7 --close B-D --moves 3 --reset --output output/congestion
//! RUST_LOG=debug congestion --algorithm bellman-ford --json
//! ```

mod network;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tn_core::{SimRng, TrafficConfig};
use tn_network::{RoadGraph, load_graph_csv};
use tn_output::{CsvWriter, SessionOutputObserver};
use tn_routing::Algorithm;
use tn_sim::{Advance, Session, SessionBuilder, SessionObserver};

use network::build_network;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "congestion")]
#[command(about = "Congestion-aware shortest-path session on a small road network", long_about = None)]
struct Args {
    /// Road network CSV (`from,to,base_weight[,open]`).  Defaults to the
    /// built-in five-intersection network.
    #[arg(long)]
    network: Option<PathBuf>,

    /// Source intersection.  Defaults to the first node.
    #[arg(short, long)]
    source: Option<String>,

    /// Target intersection.  Defaults to the last node.
    #[arg(short, long)]
    target: Option<String>,

    /// Reopen a road before the first move, e.g. one loaded closed from
    /// CSV.  Repeatable; applied before `--close`.
    #[arg(long = "open", value_name = "FROM-TO", value_parser = parse_road)]
    open: Vec<(String, String)>,

    /// Close a road before the first move, e.g. `--close B-D`.  Repeatable.
    #[arg(long = "close", value_name = "FROM-TO", value_parser = parse_road)]
    close: Vec<(String, String)>,

    /// How many times to advance the vehicle.
    #[arg(short, long, default_value_t = 3)]
    moves: usize,

    /// Reset the vehicle to the start after moving.
    #[arg(long)]
    reset: bool,

    /// Re-run traffic over the current path after moving.
    #[arg(long)]
    recalculate: bool,

    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
    algorithm: AlgorithmArg,

    /// Seed for base weights and fluctuation.  Omit for a different run
    /// every time.
    #[arg(long)]
    seed: Option<u64>,

    /// Write `edge_states.csv` and `route_log.csv` into this directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print snapshots as JSON instead of text.
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

fn parse_road(s: &str) -> Result<(String, String), String> {
    match s.split_once('-') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_owned(), to.trim().to_owned()))
        }
        _ => Err(format!("expected FROM-TO, got `{s}`")),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };

    // 1. Road network.
    let graph = match &args.network {
        Some(path) => load_graph_csv(path)
            .with_context(|| format!("loading road network from {}", path.display()))?,
        None => build_network(&mut rng.child(0))?,
    };
    if graph.is_empty() {
        bail!("road network has no intersections");
    }
    info!(nodes = graph.node_count(), roads = graph.edge_count(), "road network ready");

    // 2. Route endpoints.
    let (source, target) = endpoints(&graph, &args)?;

    // 3. Session, with or without CSV history.
    let builder = SessionBuilder::new(graph)
        .config(TrafficConfig::default())
        .rng(rng.child(1))
        .algorithm(args.algorithm.into())
        .route(&source, &target);

    match &args.output {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let writer = CsvWriter::new(dir)?;
            let mut session = builder.observer(SessionOutputObserver::new(writer)).build()?;
            drive(&mut session, &args)?;

            let mut obs = session.into_observer();
            obs.finish();
            if let Some(e) = obs.take_error() {
                warn!(error = %e, "session history incomplete");
            }
            info!(dir = %dir.display(), "wrote edge_states.csv and route_log.csv");
        }
        None => {
            let mut session = builder.build()?;
            drive(&mut session, &args)?;
        }
    }

    Ok(())
}

/// Resolve `--source` / `--target`, defaulting to the first and last node.
fn endpoints(graph: &RoadGraph, args: &Args) -> Result<(String, String)> {
    let labels: Vec<&str> = graph.nodes().map(|n| graph.label(n)).collect();
    let pick = |given: &Option<String>, fallback: &str| -> Result<String> {
        match given {
            Some(l) if graph.node_id(l).is_ok() => Ok(l.clone()),
            Some(l) => bail!("unknown intersection `{l}`; valid: {}", labels.join(", ")),
            None => Ok(fallback.to_owned()),
        }
    };
    let first = labels.first().copied().unwrap_or_default();
    let last = labels.last().copied().unwrap_or_default();
    Ok((pick(&args.source, first)?, pick(&args.target, last)?))
}

/// Apply the scripted interactions, printing a snapshot after each one.
fn drive<O: SessionObserver>(session: &mut Session<O>, args: &Args) -> Result<()> {
    show(session, "start", args.json)?;

    for (from, to) in &args.open {
        session.set_open(from, to, true)?;
        show(session, &format!("open {from}-{to}"), args.json)?;
    }
    for (from, to) in &args.close {
        session.set_open(from, to, false)?;
        show(session, &format!("close {from}-{to}"), args.json)?;
    }

    for i in 1..=args.moves {
        match session.advance()? {
            Advance::Moved { .. } => show(session, &format!("move {i}"), args.json)?,
            Advance::AtDestination => {
                info!("vehicle reached the destination");
                break;
            }
            Advance::NoPath => {
                warn!("no open route; the vehicle cannot move");
                break;
            }
        }
    }

    if args.recalculate {
        session.recalculate()?;
        show(session, "recalculate", args.json)?;
    }
    if args.reset {
        session.reset()?;
        show(session, "reset", args.json)?;
    }
    Ok(())
}

fn show<O: SessionObserver>(session: &Session<O>, title: &str, json: bool) -> Result<()> {
    let snapshot = session.snapshot();
    if json {
        println!("{}", serde_json::to_string(&serde_json::json!({ "event": title, "session": snapshot }))?);
    } else {
        println!("── {title} (step {}, {}) ──", snapshot.step, snapshot.algorithm);
        print!("{snapshot}");
        println!();
    }
    Ok(())
}
