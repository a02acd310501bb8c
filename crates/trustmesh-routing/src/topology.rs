//! Topology discovery: positions + ledger + range threshold → graph.

use serde::{Deserialize, Serialize};

use trustmesh_ledger::{LinkLedger, NodeId, RoutingMode};

use crate::graph::WeightedGraph;

/// A position in the simulation arena, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Build the weighted graph for one heartbeat.
///
/// `positions` is indexed by node id; a `None` entry means the node has no
/// known position this tick and every pair involving it is skipped. Every
/// unordered pair closer than `max_range` becomes an undirected edge whose
/// weight comes from the mode's cost function over the ledger's current
/// view of the link.
///
/// Edges are included regardless of how poorly an endpoint is trusted:
/// avoidance is the cost function's job, not topology's, and the trust
/// floor keeps every weight finite.
#[must_use]
pub fn build_graph(
    positions: &[Option<Point>],
    ledger: &LinkLedger,
    max_range: f64,
    mode: &RoutingMode,
) -> WeightedGraph {
    let mut graph = WeightedGraph::new();

    for i in 0..positions.len() {
        let Some(pos_i) = positions[i] else { continue };
        for j in (i + 1)..positions.len() {
            let Some(pos_j) = positions[j] else { continue };
            if pos_i.distance(&pos_j) >= max_range {
                continue;
            }

            let a = i as NodeId;
            let b = j as NodeId;
            let weight = mode.edge_weight(ledger.snr(a, b), ledger.trust(a, b));
            graph.add_edge(a, b, weight);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_positions() -> Vec<Option<Point>> {
        vec![
            Some(Point::new(0.0, 0.0)),
            Some(Point::new(50.0, 0.0)),
            Some(Point::new(100.0, 0.0)),
        ]
    }

    #[test]
    fn test_range_threshold_is_strict() {
        let ledger = LinkLedger::new();
        let positions = line_positions();

        // Exactly at range: excluded. Just inside: included.
        let graph = build_graph(&positions, &ledger, 50.0, &RoutingMode::Baseline);
        assert!(graph.weight(0, 1).is_none());

        let graph = build_graph(&positions, &ledger, 50.1, &RoutingMode::Baseline);
        assert_eq!(graph.weight(0, 1), Some(1.0));
        assert!(graph.weight(0, 2).is_none());
    }

    #[test]
    fn test_baseline_unit_weights() {
        let ledger = LinkLedger::new();
        let graph = build_graph(&line_positions(), &ledger, 70.0, &RoutingMode::Baseline);
        assert_eq!(graph.weight(0, 1), Some(1.0));
        assert_eq!(graph.weight(1, 2), Some(1.0));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_proposed_weights_use_ledger() {
        let mut ledger = LinkLedger::new();
        // Two drops push trust on (0, 1) to the floor.
        ledger.update(0, 1, 0.0, true, true);
        ledger.update(0, 1, 0.0, true, true);

        let mode = RoutingMode::proposed();
        let graph = build_graph(&line_positions(), &ledger, 70.0, &mode);

        let penalized = graph.weight(0, 1).unwrap();
        let healthy = graph.weight(1, 2).unwrap();
        assert!(penalized > healthy);
        assert!((healthy - (1.0 / 20.0 + 500.0)).abs() < 1e-9);
        assert!((penalized - (1.0 / 20.0 + 500.0 / 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_position_skips_pairs() {
        let ledger = LinkLedger::new();
        let positions = vec![
            Some(Point::new(0.0, 0.0)),
            None,
            Some(Point::new(10.0, 0.0)),
        ];
        let graph = build_graph(&positions, &ledger, 100.0, &RoutingMode::Baseline);
        assert!(!graph.contains(1));
        assert_eq!(graph.weight(0, 2), Some(1.0));
    }

    #[test]
    fn test_penalized_endpoints_keep_their_edges() {
        // Even a node whose every link sits at the trust floor stays in
        // the graph; only its edge costs grow.
        let mut ledger = LinkLedger::new();
        for _ in 0..5 {
            ledger.update(0, 1, 0.0, true, true);
            ledger.update(1, 2, 0.0, true, true);
        }
        let graph = build_graph(
            &line_positions(),
            &ledger,
            70.0,
            &RoutingMode::proposed(),
        );
        assert!(graph.contains(1));
        assert_eq!(graph.edge_count(), 2);
    }
}
