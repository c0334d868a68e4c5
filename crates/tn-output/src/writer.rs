//! The `OutputWriter` trait implemented by backend writers.

use crate::{EdgeStateRow, OutputResult, RouteLogRow};

/// Sink for session history.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored and retrieved with [`SessionOutputObserver::take_error`](crate::SessionOutputObserver::take_error).
pub trait OutputWriter {
    /// Write every road's state for one traffic pass.
    fn write_edge_states(&mut self, rows: &[EdgeStateRow]) -> OutputResult<()>;

    /// Write one replan row.
    fn write_route(&mut self, row: &RouteLogRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
