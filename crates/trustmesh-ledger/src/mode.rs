//! Routing mode and the edge cost function it carries.

use serde::{Deserialize, Serialize};

use crate::ledger::TRUST_FLOOR;

/// Default weight of the signal-quality term in the Proposed cost.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Default weight of the trust term in the Proposed cost.
pub const DEFAULT_BETA: f64 = 500.0;

/// Which cost function and drop policy the routing plane runs under.
///
/// `Proposed` couples physical link quality with reputation; drops decay
/// trust and the per-edge cost grows as trust falls. `Baseline` is plain
/// hop-count routing: unit edge weights, drops counted but never punished.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoutingMode {
    /// Trust-weighted routing: `cost = alpha / snr + beta / trust`.
    Proposed {
        /// Weight of the `1/snr` term.
        alpha: f64,
        /// Weight of the `1/trust` term.
        beta: f64,
        /// Hard lower bound applied to trust before division.
        trust_floor: f64,
    },
    /// Hop-count routing: every edge costs `1.0`.
    Baseline,
}

impl RoutingMode {
    /// The Proposed mode with default parameters.
    #[must_use]
    pub fn proposed() -> Self {
        Self::Proposed {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            trust_floor: TRUST_FLOOR,
        }
    }

    /// Whether observed drops decay link trust under this mode.
    #[must_use]
    pub fn penalizes_drops(&self) -> bool {
        matches!(self, Self::Proposed { .. })
    }

    /// Cost of an edge with the given smoothed SNR and trust.
    ///
    /// Trust is clamped to the floor before division, so the cost is
    /// bounded at roughly `alpha / snr_min + beta / trust_floor` and a
    /// fully penalized link stays finite-cost.
    #[must_use]
    pub fn edge_weight(&self, snr: f64, trust: f64) -> f64 {
        match self {
            Self::Proposed {
                alpha,
                beta,
                trust_floor,
            } => {
                let trust = trust.max(*trust_floor);
                alpha / snr + beta / trust
            }
            Self::Baseline => 1.0,
        }
    }

    /// Human-readable mode label used in the run summary.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Proposed { .. } => "Proposed",
            Self::Baseline => "Baseline",
        }
    }

    /// Mode as the `0|1` flag emitted in the machine-readable result line.
    #[must_use]
    pub fn flag(&self) -> u8 {
        match self {
            Self::Proposed { .. } => 1,
            Self::Baseline => 0,
        }
    }
}
