//! Flow and malicious-set selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use trustmesh_ledger::NodeId;

/// One source/destination traffic pair, immutable for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Originating node.
    pub source: NodeId,
    /// Destination node.
    pub dest: NodeId,
}

/// Remove and return the candidate at `index` in set order.
fn take_nth(candidates: &mut BTreeSet<NodeId>, index: usize) -> Option<NodeId> {
    let picked = candidates.iter().nth(index).copied()?;
    candidates.remove(&picked);
    Some(picked)
}

/// Pick the ground-truth malicious set: `count` distinct nodes sampled
/// without replacement.
///
/// The selection is ground truth only; the ledger is never told. The
/// routing plane has to discover these nodes through the drops they
/// cause.
#[must_use]
pub fn select_blackholes(rng: &mut ChaCha8Rng, num_nodes: u32, count: u32) -> BTreeSet<NodeId> {
    let mut candidates: BTreeSet<NodeId> = (0..num_nodes).collect();
    let mut blackholes = BTreeSet::new();
    for _ in 0..count {
        if candidates.is_empty() {
            break;
        }
        let index = rng.gen_range(0..candidates.len());
        if let Some(node) = take_nth(&mut candidates, index) {
            blackholes.insert(node);
        }
    }
    blackholes
}

/// Pick `count` flows with unique endpoints disjoint from the malicious
/// set. Selection stops early when fewer than two candidates remain.
#[must_use]
pub fn select_flows(
    rng: &mut ChaCha8Rng,
    num_nodes: u32,
    blackholes: &BTreeSet<NodeId>,
    count: u32,
) -> Vec<Flow> {
    let mut available: BTreeSet<NodeId> =
        (0..num_nodes).filter(|n| !blackholes.contains(n)).collect();

    let mut flows = Vec::new();
    for _ in 0..count {
        if available.len() < 2 {
            break;
        }
        let source_index = rng.gen_range(0..available.len());
        let Some(source) = take_nth(&mut available, source_index) else {
            break;
        };
        let dest_index = rng.gen_range(0..available.len());
        let Some(dest) = take_nth(&mut available, dest_index) else {
            break;
        };
        flows.push(Flow { source, dest });
    }
    flows
}
