//! The per-heartbeat weighted graph.

use std::collections::{BTreeMap, BTreeSet};

use trustmesh_ledger::NodeId;

/// An undirected graph with one weight per edge.
///
/// Built from scratch on every heartbeat and discarded afterwards.
/// Adjacency and weights are kept in ordered maps so that iteration, and
/// therefore everything downstream including path tie-breaking, is
/// deterministic for a given set of insertions.
#[derive(Clone, Debug, Default)]
pub struct WeightedGraph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    weights: BTreeMap<(NodeId, NodeId), f64>,
}

impl WeightedGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the undirected edge `(a, b)` with the given weight.
    ///
    /// Both directions become traversable. Re-inserting an edge replaces
    /// its weight.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        self.weights.insert((a, b), weight);
        self.weights.insert((b, a), weight);
    }

    /// Whether the node has at least one incident edge.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Neighbors of a node, ascending by id.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Weight of the edge `(a, b)`, if present.
    #[must_use]
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.weights.get(&(a, b)).copied()
    }

    /// Number of nodes with at least one incident edge.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.len() / 2
    }

    /// Whether the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
