//! Unit tests for tn-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use tn_core::TrafficConfig;
    use tn_network::RoadGraph;
    use tn_sim::SessionBuilder;

    use crate::csv::CsvWriter;
    use crate::row::{EdgeStateRow, RouteLogRow};
    use crate::writer::OutputWriter;
    use crate::SessionOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn chain() -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_edge("A", "B", 10.0).unwrap();
        g.add_edge("B", "C", 10.0).unwrap();
        g
    }

    fn read(dir: &TempDir, name: &str) -> Vec<String> {
        std::fs::read_to_string(dir.path().join(name))
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(read(&dir, "edge_states.csv"), ["step,from,to,open,congestion,effective_weight"]);
        assert_eq!(read(&dir, "route_log.csv"), ["step,event,path,cost,cursor"]);
    }

    #[test]
    fn rows_written_verbatim() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_edge_states(&[EdgeStateRow {
            step:             2,
            from:             "A".into(),
            to:               "B".into(),
            open:             false,
            congestion:       0.1,
            effective_weight: f64::INFINITY,
        }])
        .unwrap();
        w.write_route(&RouteLogRow { step: 2, event: "toggle", path: String::new(), cost: f64::INFINITY, cursor: 0 })
            .unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // idempotent

        assert_eq!(read(&dir, "edge_states.csv")[1], "2,A,B,0,0.100000,inf");
        assert_eq!(read(&dir, "route_log.csv")[1], "2,toggle,,inf,0");
    }

    #[test]
    fn session_history_recorded() {
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut session = SessionBuilder::new(chain())
            .config(TrafficConfig::without_fluctuation())
            .seed(0)
            .route("A", "C")
            .observer(SessionOutputObserver::new(writer))
            .build()
            .unwrap();

        session.advance().unwrap();
        session.advance().unwrap();
        session.advance().unwrap(); // at destination: no rows
        session.reset().unwrap();

        let mut obs = session.into_observer();
        obs.finish();
        assert!(obs.take_error().is_none());

        // 3 traffic passes × 2 roads.
        let edges = read(&dir, "edge_states.csv");
        assert_eq!(edges.len(), 1 + 3 * 2);
        assert_eq!(edges[1], "1,A,B,1,0.050000,10.5");

        let routes = read(&dir, "route_log.csv");
        let events: Vec<&str> = routes[1..].iter().map(|r| r.split(',').nth(1).unwrap()).collect();
        assert_eq!(events, ["start", "advance", "advance", "reset"]);
        assert_eq!(routes[1], "0,start,A>B>C,20,0");
        assert!(routes[4].ends_with(",0"));
    }
}

#[cfg(test)]
mod error_capture {
    use std::io;

    use tn_network::RoadGraph;
    use tn_sim::SessionBuilder;

    use crate::row::{EdgeStateRow, RouteLogRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult, SessionOutputObserver};

    /// Fails every write after the first `ok` calls.
    struct FlakyWriter {
        ok:    usize,
        calls: usize,
    }

    impl FlakyWriter {
        fn tick(&mut self) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                Err(OutputError::Io(io::Error::other(format!("write {} failed", self.calls))))
            } else {
                Ok(())
            }
        }
    }

    impl OutputWriter for FlakyWriter {
        fn write_edge_states(&mut self, _rows: &[EdgeStateRow]) -> OutputResult<()> {
            self.tick()
        }
        fn write_route(&mut self, _row: &RouteLogRow) -> OutputResult<()> {
            self.tick()
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_kept_and_session_unaffected() {
        let mut g = RoadGraph::new();
        g.add_edge("A", "B", 1.0).unwrap();
        let mut session = SessionBuilder::new(g)
            .seed(0)
            .route("A", "B")
            .observer(SessionOutputObserver::new(FlakyWriter { ok: 1, calls: 0 }))
            .build()
            .unwrap();

        session.advance().unwrap();
        session.reset().unwrap();
        assert_eq!(session.cursor(), 0);

        let mut obs = session.into_observer();
        let err = obs.take_error().expect("error stored");
        assert_eq!(err.to_string(), "I/O error: write 2 failed");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 5);
    }
}
