//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EdgeStateRow, OutputResult, RouteLogRow};

/// Writes session history to `edge_states.csv` and `route_log.csv`.
pub struct CsvWriter {
    edges:    Writer<File>,
    routes:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut edges = Writer::from_path(dir.join("edge_states.csv"))?;
        edges.write_record(["step", "from", "to", "open", "congestion", "effective_weight"])?;

        let mut routes = Writer::from_path(dir.join("route_log.csv"))?;
        routes.write_record(["step", "event", "path", "cost", "cursor"])?;

        Ok(Self { edges, routes, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_edge_states(&mut self, rows: &[EdgeStateRow]) -> OutputResult<()> {
        for row in rows {
            self.edges.write_record(&[
                row.step.to_string(),
                row.from.clone(),
                row.to.clone(),
                (row.open as u8).to_string(),
                format!("{:.6}", row.congestion),
                row.effective_weight.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_route(&mut self, row: &RouteLogRow) -> OutputResult<()> {
        self.routes.write_record(&[
            row.step.to_string(),
            row.event.to_owned(),
            row.path.clone(),
            row.cost.to_string(),
            row.cursor.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.edges.flush()?;
        self.routes.flush()?;
        Ok(())
    }
}
