//! The link ledger: reputation and signal quality per unordered node pair.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::key::{LinkKey, NodeId};
use crate::metric::LinkMetric;

/// Smoothing factor for the SNR exponential moving average.
pub const SNR_EMA_ALPHA: f64 = 0.3;

/// Multiplier applied to trust on each observed drop.
pub const TRUST_PENALTY_FACTOR: f64 = 0.5;

/// Hard lower bound on any link's trust.
///
/// Keeps every penalized link expensive but routable: a 30% floor
/// preserves graph connectivity even after trust collapses network-wide.
pub const TRUST_FLOOR: f64 = 0.3;

/// Trust reported for pairs the ledger has never seen.
pub const DEFAULT_TRUST: f64 = 1.0;

/// SNR reported for pairs with no positive signal observation yet.
pub const DEFAULT_SNR: f64 = 20.0;

/// Fraction of low-trust incident links above which a node is classified
/// as a blackhole.
pub const LOW_TRUST_MAJORITY: f64 = 0.5;

/// Tunable parameters of the ledger's update laws.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// EMA smoothing factor for SNR observations.
    pub ema_alpha: f64,
    /// Trust multiplier per observed drop.
    pub penalty_factor: f64,
    /// Hard lower bound on trust.
    pub trust_floor: f64,
    /// Trust reported for unseen pairs.
    pub default_trust: f64,
    /// SNR reported for unseen or signal-less pairs.
    pub default_snr: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ema_alpha: SNR_EMA_ALPHA,
            penalty_factor: TRUST_PENALTY_FACTOR,
            trust_floor: TRUST_FLOOR,
            default_trust: DEFAULT_TRUST,
            default_snr: DEFAULT_SNR,
        }
    }
}

/// What a single `update` call did to the link record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateOutcome {
    /// A trust penalty was applied by this update.
    pub penalized: bool,
    /// Trust after the update.
    pub trust: f64,
}

/// Reputation and smoothed signal quality for every observed link.
///
/// Indexed by the unordered pair, so both directions of a link share one
/// record. Entries are materialized with defaults on first update and are
/// never removed during a run. Keys iterate in a stable order, which keeps
/// downstream topology construction deterministic.
#[derive(Clone, Debug, Default)]
pub struct LinkLedger {
    entries: BTreeMap<LinkKey, LinkMetric>,
    config: LedgerConfig,
}

impl LinkLedger {
    /// Create an empty ledger with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty ledger with custom parameters.
    #[must_use]
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
        }
    }

    /// The ledger's parameters.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Record one transmission outcome on the link `(a, b)`.
    ///
    /// A positive `snr` is folded into the link's moving average. When
    /// `is_drop` is set the drop counter advances, and (only while
    /// `trust_enabled`) trust is halved down to the floor. The returned
    /// outcome reports whether a penalty was applied so the caller can
    /// account for it; the ledger itself keeps no counters.
    pub fn update(
        &mut self,
        a: NodeId,
        b: NodeId,
        snr: f64,
        is_drop: bool,
        trust_enabled: bool,
    ) -> UpdateOutcome {
        let key = LinkKey::new(a, b);
        let metric = self.entries.entry(key).or_default();

        if snr > 0.0 {
            metric.smooth_snr(snr, self.config.ema_alpha);
        }

        let mut penalized = false;
        if is_drop {
            metric.drops = metric.drops.saturating_add(1);
            if trust_enabled {
                metric.decay_trust(self.config.penalty_factor, self.config.trust_floor);
                penalized = true;
            }
        }

        UpdateOutcome {
            penalized,
            trust: metric.trust,
        }
    }

    /// Current trust for the pair, or the default for unseen pairs.
    ///
    /// Deliberately consults only accumulated drop evidence, never any
    /// externally supplied malicious-node set. Blackholes start at full
    /// trust like everyone else and are discovered through their drops.
    #[must_use]
    pub fn trust(&self, a: NodeId, b: NodeId) -> f64 {
        self.entries
            .get(&LinkKey::new(a, b))
            .map(|m| m.trust)
            .unwrap_or(self.config.default_trust)
    }

    /// Current smoothed SNR for the pair, or the default when the link is
    /// unseen or has no positive signal observation yet.
    #[must_use]
    pub fn snr(&self, a: NodeId, b: NodeId) -> f64 {
        match self.entries.get(&LinkKey::new(a, b)) {
            Some(m) if m.avg_snr > 0.0 => m.avg_snr,
            _ => self.config.default_snr,
        }
    }

    /// Cumulative observed drops on the pair.
    #[must_use]
    pub fn drops(&self, a: NodeId, b: NodeId) -> u32 {
        self.entries
            .get(&LinkKey::new(a, b))
            .map(|m| m.drops)
            .unwrap_or(0)
    }

    /// The raw record for a pair, if the ledger has seen it.
    #[must_use]
    pub fn get(&self, a: NodeId, b: NodeId) -> Option<&LinkMetric> {
        self.entries.get(&LinkKey::new(a, b))
    }

    /// Classify a node from accumulated evidence alone.
    ///
    /// A node is considered malicious iff it has at least one ledger entry
    /// and more than half of its incident entries carry trust below the
    /// floor. This is a hook for self-blacklisting: routing never consults
    /// it, avoidance happens through edge costs.
    #[must_use]
    pub fn is_dynamically_malicious(&self, node: NodeId) -> bool {
        let mut total = 0u32;
        let mut low_trust = 0u32;
        for (key, metric) in &self.entries {
            if key.involves(node) {
                total += 1;
                if metric.trust < self.config.trust_floor {
                    low_trust += 1;
                }
            }
        }
        total > 0 && f64::from(low_trust) / f64::from(total) > LOW_TRUST_MAJORITY
    }

    /// Number of links the ledger has seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has seen any link at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&LinkKey, &LinkMetric)> {
        self.entries.iter()
    }
}
