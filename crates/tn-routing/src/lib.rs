//! `tn-routing`: shortest paths over a [`tn_network::RoadGraph`].
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`router`]       | `Router` trait, `Algorithm`, `SearchTree`, `PlannedPath` |
//! | [`dijkstra`]     | `DijkstraRouter` (default)                            |
//! | [`bellman_ford`] | `BellmanFordRouter`                                   |
//! | [`error`]        | `RoutingError`, `RoutingResult<T>`                    |
//!
//! # Cost
//!
//! Every router prices an edge at its **effective** weight.  Closed roads
//! carry `+inf` and are never relaxed, so "no path" simply means the target
//! stayed unreached; it is reported as [`PlannedPath::unreachable`], not as
//! an error.

pub mod bellman_ford;
pub mod dijkstra;
pub mod error;
pub mod router;


pub use bellman_ford::BellmanFordRouter;
pub use dijkstra::DijkstraRouter;
pub use error::{RoutingError, RoutingResult};
pub use router::{distances, shortest_path, Algorithm, PlannedPath, Router, SearchTree};
