//! Unit tests for tn-sim.

use tn_core::TrafficConfig;
use tn_network::{RoadGraph, TrafficPass};
use tn_routing::PlannedPath;

use crate::{Session, SessionBuilder, SessionEvent, SessionObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A → B → C → D at weight 1 per hop, plus a slow A → D bypass (10).
fn corridor() -> RoadGraph {
    let mut g = RoadGraph::new();
    g.add_edge("A", "B", 1.0).unwrap();
    g.add_edge("B", "C", 1.0).unwrap();
    g.add_edge("C", "D", 1.0).unwrap();
    g.add_edge("A", "D", 10.0).unwrap();
    g
}

/// Deterministic session over `corridor()` routing A → D.
fn session() -> Session<Recorder> {
    SessionBuilder::new(corridor())
        .config(TrafficConfig::without_fluctuation())
        .seed(1)
        .route("A", "D")
        .observer(Recorder::default())
        .build()
        .unwrap()
}

fn labels<O: SessionObserver>(s: &Session<O>) -> Vec<String> {
    s.path().nodes.iter().map(|&n| s.graph().label(n).to_owned()).collect()
}

#[derive(Default)]
struct Recorder {
    events:  Vec<&'static str>,
    passes:  Vec<(u64, TrafficPass)>,
    cursors: Vec<usize>,
}

impl SessionObserver for Recorder {
    fn on_traffic_update(&mut self, step: u64, _graph: &RoadGraph, pass: &TrafficPass) {
        self.passes.push((step, *pass));
    }

    fn on_replan(&mut self, _step: u64, event: SessionEvent, _graph: &RoadGraph, _path: &PlannedPath, cursor: usize) {
        self.events.push(event.tag());
        self.cursors.push(cursor);
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tn_core::TrafficConfig;
    use tn_network::NetworkError;

    use crate::{Advance, SessionBuilder, SimError};

    use super::*;

    #[test]
    fn first_plan_computed_on_build() {
        let s = session();
        assert_eq!(labels(&s), ["A", "B", "C", "D"]);
        assert_eq!(s.path().cost, 3.0);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.step(), 0);
        assert_eq!(s.observer().events, ["start"]);
    }

    #[test]
    fn no_route_means_no_path() {
        let mut s = SessionBuilder::new(corridor()).seed(0).build().unwrap();
        assert!(s.path().is_empty());
        assert_eq!(s.vehicle(), None);
        assert_eq!(s.advance().unwrap(), Advance::NoPath);
        assert_eq!(s.step(), 0);
    }

    #[test]
    fn unknown_route_label() {
        let err = SessionBuilder::new(corridor()).route("A", "Z").build().err().unwrap();
        assert!(matches!(err, SimError::Network(NetworkError::NodeNotFound(l)) if l == "Z"));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = TrafficConfig { congestion_increment: 0.0, ..Default::default() };
        let err = SessionBuilder::new(corridor()).config(cfg).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }
}

// ── Vehicle movement ──────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use crate::Advance;

    use super::*;

    #[test]
    fn advance_moves_and_loads_path() {
        let mut s = session();
        assert_eq!(s.advance().unwrap(), Advance::Moved { cursor: 1 });
        assert_eq!(s.step(), 1);
        assert_eq!(s.vehicle().map(|n| s.graph().label(n)), Some("B"));

        // Every hop of the traveled path loaded once; the bypass decayed.
        for e in s.graph().edges() {
            let on_path = s.graph().label(e.to) != "D" || s.graph().label(e.from) == "C";
            if on_path {
                assert!((e.congestion - 0.05).abs() < 1e-12, "{e:?}");
            } else {
                assert_eq!(e.congestion, 0.0);
            }
        }
        assert_eq!(s.observer().passes, [(1, TrafficPass { loaded: 3, decayed: 1, closed: 0 })]);
    }

    #[test]
    fn advance_at_destination_is_a_no_op() {
        let mut s = session();
        for expected in 1..=3 {
            assert_eq!(s.advance().unwrap(), Advance::Moved { cursor: expected });
        }
        let before = s.graph().traffic_state();
        let step = s.step();

        assert_eq!(s.advance().unwrap(), Advance::AtDestination);
        assert_eq!(s.cursor(), 3);
        assert_eq!(s.step(), step);
        assert_eq!(s.graph().traffic_state(), before);
    }

    #[test]
    fn reset_rewinds_and_decays_once() {
        let mut s = session();
        s.advance().unwrap();
        s.advance().unwrap();
        let congestion: Vec<f64> = s.graph().edges().map(|e| e.congestion).collect();

        s.reset().unwrap();
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.step(), 3);
        for (before, e) in congestion.iter().zip(s.graph().edges()) {
            assert!((e.congestion - before * 0.95).abs() < 1e-12);
        }
        assert_eq!(s.observer().passes.last().unwrap().1.loaded, 0);
    }

    #[test]
    fn recalculate_loads_current_path_and_restarts() {
        let mut s = session();
        s.advance().unwrap();
        s.recalculate().unwrap();
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.step(), 2);
        let ab = s.graph().edges().next().unwrap();
        assert!((ab.congestion - 0.10).abs() < 1e-12);
        assert_eq!(s.observer().events, ["start", "advance", "recalculate"]);
    }

    #[test]
    fn congestion_bounded_over_long_session() {
        let mut s = SessionBuilder::new(corridor()).seed(77).route("A", "D").build().unwrap();
        for i in 0..300 {
            if i % 7 == 0 {
                s.reset().unwrap();
            } else {
                s.advance().unwrap();
            }
            for e in s.graph().edges() {
                assert!((0.0..=1.0).contains(&e.congestion));
            }
            assert!(s.path().is_empty() || s.cursor() < s.path().len());
        }
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let run = || {
            let mut s = SessionBuilder::new(corridor()).seed(9).route("A", "D").build().unwrap();
            for _ in 0..5 {
                s.advance().unwrap();
            }
            s.reset().unwrap();
            s.snapshot()
        };
        assert_eq!(run(), run());
    }
}

// ── Road toggles and replanning ───────────────────────────────────────────────

#[cfg(test)]
mod toggles {
    use tn_network::NetworkError;
    use tn_routing::Algorithm;

    use crate::SimError;

    use super::*;

    #[test]
    fn closing_the_only_route_leaves_no_path() {
        let mut g = RoadGraph::new();
        g.add_edge("A", "B", 10.0).unwrap();
        g.add_edge("B", "C", 10.0).unwrap();
        let mut s = SessionBuilder::new(g).seed(0).route("A", "C").build().unwrap();
        assert_eq!(s.path().cost, 20.0);

        s.set_open("A", "B", false).unwrap();
        assert!(s.path().is_empty());
        assert_eq!(s.path().cost, f64::INFINITY);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.vehicle(), None);

        s.set_open("A", "B", true).unwrap();
        assert_eq!(s.path().len(), 3);
    }

    #[test]
    fn cursor_clamped_when_path_shrinks() {
        let mut s = session();
        s.advance().unwrap();
        s.advance().unwrap();
        assert_eq!(s.cursor(), 2);

        s.set_open("C", "D", false).unwrap();
        assert_eq!(labels(&s), ["A", "D"]);
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.observer().cursors.last(), Some(&1));
    }

    #[test]
    fn toggling_missing_road_changes_nothing() {
        let mut s = session();
        let before = s.snapshot();
        let err = s.set_open("D", "A", false).unwrap_err();
        assert!(matches!(err, SimError::Network(NetworkError::EdgeNotFound { .. })));
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.observer().events, ["start"]);
    }

    #[test]
    fn bad_route_selection_keeps_previous_route() {
        let mut s = session();
        assert!(s.select_route("A", "Q").is_err());
        assert_eq!(labels(&s), ["A", "B", "C", "D"]);

        s.select_route("B", "D").unwrap();
        assert_eq!(labels(&s), ["B", "C", "D"]);
    }

    #[test]
    fn algorithm_switch_finds_same_cost() {
        let mut s = session();
        let cost = s.path().cost;
        let path = s.set_algorithm(Algorithm::BellmanFord).unwrap();
        assert_eq!(path.cost, cost);
        assert_eq!(s.algorithm(), Algorithm::BellmanFord);
        assert_eq!(s.observer().events.last(), Some(&"algorithm"));
    }
}

// ── Rollback on routing failure ───────────────────────────────────────────────

#[cfg(test)]
mod rollback {
    use tn_core::EdgeId;
    use tn_routing::{Algorithm, RoutingError};

    use crate::SimError;

    use super::*;

    fn edge<O: SessionObserver>(s: &Session<O>, from: &str, to: &str) -> EdgeId {
        let g = s.graph();
        g.find_edge(g.node_id(from).unwrap(), g.node_id(to).unwrap()).unwrap()
    }

    fn is_algorithm_failure(err: &SimError) -> bool {
        matches!(err, SimError::Routing(RoutingError::AlgorithmFailure { .. }))
    }

    #[test]
    fn failed_replan_after_traffic_pass_restores_graph() {
        let mut s = session();
        s.advance().unwrap();
        let ab = edge(&s, "A", "B");
        // The next pass derives a NaN weight for A -> B, which routing rejects.
        s.graph_mut().force_base_weight(ab, f64::NAN);

        let traffic = s.graph().traffic_state();
        let (cursor, step, path) = (s.cursor(), s.step(), s.path().clone());

        let advanced = s.advance().map(|_| ());
        let reset = s.reset();
        let recalculated = s.recalculate();
        for result in [advanced, reset, recalculated] {
            assert!(is_algorithm_failure(&result.unwrap_err()));
        }

        assert_eq!(s.graph().traffic_state(), traffic);
        assert_eq!(s.cursor(), cursor);
        assert_eq!(s.step(), step);
        assert_eq!(s.path(), &path);
        assert_eq!(s.observer().events, ["start", "advance"]);
        assert_eq!(s.observer().passes.len(), 1);
    }

    #[test]
    fn failed_replan_after_toggle_keeps_road_open() {
        let mut s = session();
        let ab = edge(&s, "A", "B");
        s.graph_mut().force_open_weight(ab, f64::NAN);

        let err = s.set_open("C", "D", false).unwrap_err();
        assert!(is_algorithm_failure(&err));
        assert!(s.graph().edge(edge(&s, "C", "D")).is_open);
        assert_eq!(labels(&s), ["A", "B", "C", "D"]);
        assert_eq!(s.observer().events, ["start"]);
    }

    #[test]
    fn failed_algorithm_switch_keeps_previous_algorithm() {
        let mut s = session();
        let ab = edge(&s, "A", "B");
        s.graph_mut().force_open_weight(ab, f64::NAN);

        assert!(is_algorithm_failure(&s.set_algorithm(Algorithm::BellmanFord).unwrap_err()));
        assert_eq!(s.algorithm(), Algorithm::Dijkstra);
    }
}

// ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshots {
    use tn_network::CongestionBand;

    use super::*;

    #[test]
    fn snapshot_resolves_labels() {
        let mut s = session();
        s.advance().unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.source.as_deref(), Some("A"));
        assert_eq!(snap.target.as_deref(), Some("D"));
        assert_eq!(snap.path, ["A", "B", "C", "D"]);
        assert_eq!(snap.vehicle.as_deref(), Some("B"));
        assert_eq!(snap.algorithm, "dijkstra");
        assert_eq!(snap.edges.len(), 4);
        assert!(snap.edges.iter().all(|e| e.band == CongestionBand::Free));
        assert!(snap.to_string().starts_with("Shortest path: A -> B -> C -> D | cost: "));
    }

    #[test]
    fn closed_road_snapshot() {
        let mut s = session();
        s.set_open("A", "D", false).unwrap();
        s.set_open("B", "C", false).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.cost, None);
        assert!(snap.path.is_empty());
        let closed: Vec<_> = snap.edges.iter().filter(|e| !e.open).collect();
        assert_eq!(closed.len(), 2);
        assert!(closed.iter().all(|e| e.effective_weight.is_none() && e.band == CongestionBand::Closed));
        assert!(snap.to_string().starts_with("No path found"));
    }
}
