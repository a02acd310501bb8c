//! Single-source shortest path over the heartbeat graph.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use trustmesh_ledger::NodeId;

use crate::graph::WeightedGraph;

/// Frontier entry for the Dijkstra heap.
///
/// Ordered so the binary max-heap pops the smallest distance first, and
/// among equal distances the smallest node id. Weights are finite and
/// non-negative by construction, so the partial comparison never sees a
/// NaN.
#[derive(Clone, Copy, PartialEq)]
struct Frontier {
    dist: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Least-cost path from `source` to `dest` under the graph's weights.
///
/// Classical Dijkstra with a binary heap, terminated as soon as the
/// destination settles. Equal-cost alternatives resolve deterministically:
/// the frontier prefers lower node ids and relaxation keeps the first
/// predecessor found. Returns the ordered node sequence
/// `[source, …, dest]`, or an empty vector when either endpoint is
/// missing from the graph or no path exists.
#[must_use]
pub fn shortest_path(graph: &WeightedGraph, source: NodeId, dest: NodeId) -> Vec<NodeId> {
    if !graph.contains(source) || !graph.contains(dest) {
        return Vec::new();
    }
    if source == dest {
        return vec![source];
    }

    let mut dist: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut prev: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(source, 0.0);
    heap.push(Frontier {
        dist: 0.0,
        node: source,
    });

    while let Some(Frontier { dist: d, node }) = heap.pop() {
        if node == dest {
            break;
        }
        // Stale frontier entry for an already-settled node.
        if d > dist.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for neighbor in graph.neighbors(node) {
            let Some(weight) = graph.weight(node, neighbor) else {
                continue;
            };
            let alt = d + weight;
            if alt < dist.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                dist.insert(neighbor, alt);
                prev.insert(neighbor, node);
                heap.push(Frontier {
                    dist: alt,
                    node: neighbor,
                });
            }
        }
    }

    if !dist.contains_key(&dest) {
        return Vec::new();
    }

    // Walk predecessors back from the destination.
    let mut path = vec![dest];
    let mut current = dest;
    while let Some(&p) = prev.get(&current) {
        path.push(p);
        current = p;
    }
    path.reverse();
    debug_assert_eq!(path.first(), Some(&source));
    path
}
