//! # trustmesh-sim
//!
//! Discrete-event simulation harness for the trust-aware routing core.
//!
//! Provides:
//! - A deterministic single-threaded event scheduler and simulated clock
//! - Node container with addressing, host route tables, and mobility
//! - The evidence ingestor translating trace events into ledger updates
//! - The heartbeat controller rebuilding the routing plane every 100 ms
//! - Flow traffic, evaluation counters, and result emission
//!
//! ## Scheduling model
//!
//! Everything runs cooperatively on the simulator's event loop: exactly
//! one logical flow of control, no synchronization, no suspension points
//! inside the core. Evidence is applied in delivery order, and every
//! heartbeat sees the union of all evidence up to its tick.
//!
//! ## Example
//!
//! ```
//! use trustmesh_routing::Point;
//! use trustmesh_sim::{run_campaign, SimConfig};
//!
//! let config = SimConfig::builder()
//!     .with_num_nodes(3)
//!     .with_num_flows(1)
//!     .with_num_blackholes(0)
//!     .with_sim_time_secs(2.0)
//!     .with_max_radio_range(70.0)
//!     .with_static_positions(vec![
//!         Point::new(0.0, 0.0),
//!         Point::new(50.0, 0.0),
//!         Point::new(100.0, 0.0),
//!     ])
//!     .build();
//!
//! let summary = run_campaign(config).expect("config is valid");
//! assert!(summary.result_line.starts_with("RESULT_DATA, "));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod event;
pub mod flows;
pub mod harness;
pub mod heartbeat;
pub mod ingest;
pub mod install;
pub mod metrics;
pub mod mobility;
pub mod radio;
pub mod rng;
pub mod time;
pub mod trace;
pub mod world;

// Re-export main types
pub use config::{ConfigError, SimConfig, SimConfigBuilder};
pub use event::{Event, Packet, PacketHeader, Scheduler, DEFAULT_TTL};
pub use flows::{select_blackholes, select_flows, Flow};
pub use harness::{run_campaign, RunSummary, Simulation};
pub use heartbeat::{HeartbeatController, HeartbeatState, HEARTBEAT_INTERVAL};
pub use ingest::EvidenceIngestor;
pub use install::install_route;
pub use metrics::Metrics;
pub use mobility::{Mobility, MobilityConfig};
pub use rng::RngStreams;
pub use time::SimTime;
pub use world::{NodeWorld, WIFI_INTERFACE};
