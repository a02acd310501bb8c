//! # trustmesh-routing
//!
//! Topology discovery and least-cost path computation for trust-aware
//! MANET routing.
//!
//! Provides:
//! - [`WeightedGraph`]: the per-heartbeat projection of positions and
//!   ledger state into an undirected weighted graph
//! - [`build_graph`]: edge inclusion by radio range, weights from the
//!   routing mode's cost function
//! - [`shortest_path`]: deterministic Dijkstra with early termination
//! - [`HostRouteTable`]: the per-node host-route abstraction routes are
//!   installed into
//!
//! The graph is rebuilt and discarded on every heartbeat; it never
//! outlives one control-plane tick.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod pathfinder;
pub mod table;
pub mod topology;

#[cfg(test)]
mod proptests;

// Re-export main types
pub use error::{Result, RoutingError};
pub use graph::WeightedGraph;
pub use pathfinder::shortest_path;
pub use table::{HostRouteTable, InterfaceId, RouteEntry};
pub use topology::{build_graph, Point};
