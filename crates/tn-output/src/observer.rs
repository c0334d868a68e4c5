//! `SessionOutputObserver<W>`: bridges `SessionObserver` to an `OutputWriter`.

use tn_network::{RoadGraph, TrafficPass};
use tn_routing::PlannedPath;
use tn_sim::{SessionEvent, SessionObserver};

use crate::row::{EdgeStateRow, RouteLogRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SessionObserver`] that records road states and replans to any
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  Call [`finish`](Self::finish) when the session ends,
/// then check [`take_error`](Self::take_error).
pub struct SessionOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SessionOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Flush the writer.  Errors are stored like any other write error.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SessionObserver for SessionOutputObserver<W> {
    fn on_traffic_update(&mut self, step: u64, graph: &RoadGraph, _pass: &TrafficPass) {
        let rows: Vec<EdgeStateRow> = graph
            .edges()
            .map(|e| EdgeStateRow {
                step,
                from:             graph.label(e.from).to_owned(),
                to:               graph.label(e.to).to_owned(),
                open:             e.is_open,
                congestion:       e.congestion,
                effective_weight: e.effective_weight,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_edge_states(&rows);
            self.store_err(result);
        }
    }

    fn on_replan(
        &mut self,
        step:   u64,
        event:  SessionEvent,
        graph:  &RoadGraph,
        path:   &PlannedPath,
        cursor: usize,
    ) {
        let labels: Vec<&str> = path.nodes.iter().map(|&n| graph.label(n)).collect();
        let row = RouteLogRow {
            step,
            event: event.tag(),
            path: labels.join(">"),
            cost: path.cost,
            cursor,
        };
        let result = self.writer.write_route(&row);
        self.store_err(result);
    }
}
