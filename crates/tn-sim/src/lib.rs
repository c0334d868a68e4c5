//! `tn-sim`: the vehicle session controller.
//!
//! # Interaction cycle
//!
//! ```text
//! user action                       session
//! ──────────────────────────────    ─────────────────────────────────────────
//! select_route(source, target)  →   replan
//! set_open(from, to, open)      →   toggle road, replan
//! advance()                     →   cursor += 1, traffic pass(path), replan
//! reset()                       →   cursor  = 0, traffic pass([]),   replan
//! recalculate()                 →   cursor  = 0, traffic pass(path), replan
//! ```
//!
//! Every action runs to completion before the next one; the session owns
//! its graph outright, so there is no locking.  After each replan the cursor
//! is clamped into the new path.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tn_sim::SessionBuilder;
//!
//! let mut session = SessionBuilder::new(graph)
//!     .seed(42)
//!     .route("A", "E")
//!     .build()?;
//! session.advance()?;
//! println!("{}", session.snapshot());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod session;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SessionEvent, SessionObserver};
pub use session::{Advance, Session};
pub use snapshot::{EdgeSnapshot, SessionSnapshot};
