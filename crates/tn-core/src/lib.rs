//! `tn-core`: foundational types for the `tn` road-network workspace.
//!
//! This crate is a dependency of every other `tn-*` crate.  It has no
//! `tn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                |
//! | [`rng`]      | `SimRng` (seedable or entropy-backed)             |
//! | [`config`]   | `TrafficConfig`, congestion and weight constants |
//! | [`error`]    | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                                    |
//! |---------|---------------------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `NodeId`, `EdgeId` and `TrafficConfig`. |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TrafficConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, NodeId};
pub use rng::SimRng;
