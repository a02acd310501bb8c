//! # trustmesh-ledger
//!
//! Per-link reputation ledger for trust-aware routing in a mobile ad-hoc
//! network.
//!
//! Provides:
//! - Smoothed signal-quality tracking per link (exponential moving average)
//! - Geometric trust decay on observed drops, with a hard safety floor
//! - Dynamic blackhole classification from accumulated drop evidence
//! - A tagged routing mode carrying the cost function parameters
//!
//! ## Overview
//!
//! The ledger tracks one record per **unordered** node pair:
//!
//! - New links start with trust `1.0` and no signal history
//! - Each observed drop halves trust, down to the floor (`0.3`)
//! - Trust never drops below the floor, so a penalized link stays
//!   expensive but usable; availability is preserved over isolation
//!
//! ## Example
//!
//! ```
//! use trustmesh_ledger::{LinkLedger, RoutingMode};
//!
//! let mut ledger = LinkLedger::new();
//! let mode = RoutingMode::proposed();
//!
//! // A successful reception smooths the link's SNR estimate.
//! ledger.update(0, 1, 18.0, false, mode.penalizes_drops());
//! assert!(ledger.snr(0, 1) > 0.0);
//!
//! // Two drops take trust from 1.0 to the 0.3 floor.
//! ledger.update(0, 1, 0.0, true, mode.penalizes_drops());
//! ledger.update(0, 1, 0.0, true, mode.penalizes_drops());
//! assert_eq!(ledger.trust(0, 1), 0.3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod key;
pub mod ledger;
pub mod metric;
pub mod mode;

#[cfg(test)]
mod proptests;

// Re-export main types
pub use key::{LinkKey, NodeId};
pub use ledger::{
    LedgerConfig, LinkLedger, UpdateOutcome, DEFAULT_SNR, DEFAULT_TRUST, LOW_TRUST_MAJORITY,
    SNR_EMA_ALPHA, TRUST_FLOOR, TRUST_PENALTY_FACTOR,
};
pub use metric::LinkMetric;
pub use mode::{RoutingMode, DEFAULT_ALPHA, DEFAULT_BETA};
