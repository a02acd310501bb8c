//! Evidence ingestion: trace events → ledger updates.
//!
//! Three taps feed the ledger: successful receptions, radio-layer drops,
//! and network-layer drops. Each receives an opaque context path naming
//! the observing node. The taps never fail: malformed or out-of-range
//! events are logged and discarded, so a single bad event cannot corrupt
//! the ledger.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use trustmesh_ledger::{LinkLedger, NodeId};

use crate::event::PacketHeader;
use crate::flows::Flow;
use crate::metrics::Metrics;
use crate::radio::estimate_snr;
use crate::time::SimTime;
use crate::trace::parse_node_id;
use crate::world::NodeWorld;

/// Translates simulator trace events into ledger updates and counters.
///
/// Holds only the parameters of ingestion; the ledger, metrics, and node
/// container are borrowed per event by the simulation loop.
#[derive(Clone, Copy, Debug)]
pub struct EvidenceIngestor {
    /// Fan-out bound: only pairs currently closer than this are touched
    /// when an event's source is unknown.
    pub max_range: f64,
    /// Fallback SNR for the distance estimator.
    pub default_snr: f64,
    /// Whether drops decay trust (Proposed) or are merely counted
    /// (Baseline).
    pub trust_enabled: bool,
}

impl EvidenceIngestor {
    /// Create an ingestor with the run's parameters.
    #[must_use]
    pub fn new(max_range: f64, default_snr: f64, trust_enabled: bool) -> Self {
        Self {
            max_range,
            default_snr,
            trust_enabled,
        }
    }

    /// Resolve and validate the observing node from a context path.
    fn observing_node(&self, context: &str, world: &NodeWorld) -> Option<NodeId> {
        let Some(node) = parse_node_id(context) else {
            warn!(context, "trace context carries no node id, dropping event");
            return None;
        };
        if !world.contains(node) {
            warn!(node, "trace context names an unknown node, dropping event");
            return None;
        }
        Some(node)
    }

    /// The flow source to credit when the receiver is a known flow
    /// destination.
    fn source_from_flows(flows: &[Flow], receiver: NodeId) -> Option<NodeId> {
        flows
            .iter()
            .find(|flow| flow.dest == receiver)
            .map(|flow| flow.source)
    }

    /// All peers currently within radio range of `node`, with distances.
    fn in_range_peers(
        &self,
        world: &mut NodeWorld,
        node: NodeId,
        now: SimTime,
    ) -> Vec<(NodeId, f64)> {
        (0..world.node_count())
            .filter(|peer| *peer != node)
            .filter_map(|peer| {
                world
                    .distance(peer, node, now)
                    .filter(|d| *d < self.max_range)
                    .map(|d| (peer, d))
            })
            .collect()
    }

    /// Successful reception: credit the receiving link with an SNR
    /// estimate. With an unknown source, every in-range pair involving
    /// the receiver is credited instead.
    pub fn on_rx_ok(
        &self,
        context: &str,
        world: &mut NodeWorld,
        ledger: &mut LinkLedger,
        flows: &[Flow],
        now: SimTime,
    ) {
        let Some(node) = self.observing_node(context, world) else {
            return;
        };

        match Self::source_from_flows(flows, node) {
            Some(source) => {
                let snr = world
                    .distance(source, node, now)
                    .map(|d| estimate_snr(d, self.default_snr))
                    .unwrap_or(self.default_snr);
                ledger.update(source, node, snr, false, self.trust_enabled);
            }
            None => {
                for (peer, distance) in self.in_range_peers(world, node, now) {
                    let snr = estimate_snr(distance, self.default_snr);
                    ledger.update(peer, node, snr, false, self.trust_enabled);
                }
            }
        }
    }

    /// Radio-layer drop: a reception failure on the candidate source
    /// links, selected like `on_rx_ok`.
    pub fn on_phy_drop(
        &self,
        context: &str,
        world: &mut NodeWorld,
        ledger: &mut LinkLedger,
        metrics: &mut Metrics,
        flows: &[Flow],
        now: SimTime,
    ) {
        let Some(node) = self.observing_node(context, world) else {
            return;
        };
        metrics.phy_drops += 1;

        match Self::source_from_flows(flows, node) {
            Some(source) => {
                self.record_drop(ledger, metrics, source, node);
            }
            None => {
                for (peer, _) in self.in_range_peers(world, node, now) {
                    self.record_drop(ledger, metrics, peer, node);
                }
            }
        }
    }

    /// Network-layer drop: the signature blackhole symptom.
    ///
    /// The source is recovered from the packet header; when that fails,
    /// every in-range pair involving the dropping node is penalized.
    /// Ground-truth attribution feeds the evaluation counters only; the
    /// ledger update below is identical for honest and malicious nodes.
    #[allow(clippy::too_many_arguments)]
    pub fn on_l3_drop(
        &self,
        context: &str,
        header: &PacketHeader,
        world: &mut NodeWorld,
        ledger: &mut LinkLedger,
        metrics: &mut Metrics,
        blackholes: &BTreeSet<NodeId>,
        now: SimTime,
    ) {
        let Some(node) = self.observing_node(context, world) else {
            return;
        };
        metrics.l3_drops += 1;

        if blackholes.contains(&node) {
            metrics.malicious_drops += 1;
            metrics.blackhole_l3_drops += 1;
        }

        if ledger.is_dynamically_malicious(node) {
            debug!(node, "drop evidence classifies node as malicious");
        }

        match world.node_for_address(header.source) {
            Some(source) if source == node => {
                // A drop at the originator says nothing about any link.
            }
            Some(source) => {
                self.record_drop(ledger, metrics, source, node);
            }
            None => {
                for (peer, _) in self.in_range_peers(world, node, now) {
                    self.record_drop(ledger, metrics, peer, node);
                }
            }
        }
    }

    fn record_drop(
        &self,
        ledger: &mut LinkLedger,
        metrics: &mut Metrics,
        a: NodeId,
        b: NodeId,
    ) {
        let outcome = ledger.update(a, b, 0.0, true, self.trust_enabled);
        if outcome.penalized {
            metrics.trust_penalties += 1;
        }
    }
}
