//! `tn-network`: road graph model and congestion dynamics.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`graph`]   | `RoadGraph`, `EdgeView`, `TrafficState`                   |
//! | [`traffic`] | `update_traffic`, `TrafficPass`, `CongestionBand`         |
//! | [`loader`]  | `load_graph_csv`, `load_graph_reader`                     |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod loader;
pub mod traffic;


pub use error::{NetworkError, NetworkResult};
pub use graph::{EdgeView, RoadGraph, TrafficState};
pub use loader::{load_graph_csv, load_graph_reader};
pub use traffic::{update_traffic, CongestionBand, TrafficPass};
