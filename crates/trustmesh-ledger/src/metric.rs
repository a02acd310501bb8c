//! Per-link measurement record.

use serde::{Deserialize, Serialize};

/// Metrics tracked for one link between two nodes.
///
/// `avg_snr` stays at `0.0` until the first positive observation; after
/// that it is always positive. `trust` starts at `1.0` and is only ever
/// lowered by the ledger's decay law, which enforces the floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkMetric {
    /// Smoothed linear signal-to-noise ratio.
    pub avg_snr: f64,
    /// Cumulative observed drops on this link.
    pub drops: u32,
    /// Current reputation, in `[trust_floor, 1.0]`.
    pub trust: f64,
}

impl LinkMetric {
    /// A fresh link record: no signal history, full trust.
    #[must_use]
    pub fn new() -> Self {
        Self {
            avg_snr: 0.0,
            drops: 0,
            trust: 1.0,
        }
    }

    /// Fold a positive SNR observation into the moving average.
    pub(crate) fn smooth_snr(&mut self, snr: f64, alpha: f64) {
        self.avg_snr = alpha * snr + (1.0 - alpha) * self.avg_snr;
    }

    /// Apply one trust penalty: multiply by `factor`, clamp to `floor`.
    pub(crate) fn decay_trust(&mut self, factor: f64, floor: f64) {
        self.trust = (self.trust * factor).max(floor);
    }
}

impl Default for LinkMetric {
    fn default() -> Self {
        Self::new()
    }
}
