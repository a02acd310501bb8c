//! Route installation.
//!
//! Pushes a computed path into the host route tables of every node along
//! it, except ground-truth malicious nodes, which never receive
//! forwarding entries. A blackhole therefore keeps attracting traffic
//! exactly as long as the routing weights fail to steer around it, and
//! drops everything it receives.

use std::collections::BTreeSet;

use tracing::warn;

use trustmesh_ledger::NodeId;

use crate::metrics::Metrics;
use crate::world::NodeWorld;

/// Install next-hop entries for one flow's path `[src, …, dest]`.
///
/// For every hop node, stale routes toward the destination are swept
/// before the fresh entry goes in. Skipped installations on malicious
/// nodes are counted, and each skip is attributed as one anticipated
/// dropped packet in the evaluation counters.
pub fn install_route(
    world: &mut NodeWorld,
    metrics: &mut Metrics,
    blackholes: &BTreeSet<NodeId>,
    dest: NodeId,
    path: &[NodeId],
) {
    let Some(dest_addr) = world.address_of(dest) else {
        warn!(dest, "destination has no address, skipping installation");
        return;
    };

    for pair in path.windows(2) {
        let (current, next) = (pair[0], pair[1]);

        if blackholes.contains(&current) {
            metrics.route_skips += 1;
            metrics.malicious_drops += 1;
            continue;
        }

        let Some(next_addr) = world.address_of(next) else {
            warn!(node = next, "next hop has no address, skipping installation");
            continue;
        };
        let Some(interface) = world.interface_for(current) else {
            warn!(node = current, "no radio interface, skipping installation");
            continue;
        };
        let Some(table) = world.table_mut(current) else {
            continue;
        };

        // Sweep stale entries toward this destination, last index first.
        for index in (0..table.route_count()).rev() {
            if table.route(index).map(|route| route.dest) == Some(dest_addr) {
                let _ = table.remove_route(index);
            }
        }

        table.add_host_route(dest_addr, next_addr, interface);
    }
}
