//! `tn-output`: session history writers.
//!
//! | File              | One row per                              |
//! |-------------------|------------------------------------------|
//! | `edge_states.csv` | road, after every traffic pass           |
//! | `route_log.csv`   | replan (start, toggle, advance, reset …) |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SessionOutputObserver`], which implements `tn_sim::SessionObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tn_output::{CsvWriter, SessionOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut session = SessionBuilder::new(graph)
//!     .observer(SessionOutputObserver::new(writer))
//!     .build()?;
//! session.advance()?;
//! let mut obs = session.into_observer();
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SessionOutputObserver;
pub use row::{EdgeStateRow, RouteLogRow};
pub use writer::OutputWriter;
