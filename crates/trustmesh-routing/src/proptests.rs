//! Property-based tests for topology and pathfinding.
//!
//! These verify the routing-plane invariants for arbitrary node layouts
//! and ledger histories:
//!
//! - Proposed and Baseline modes include exactly the same edges, so a
//!   path under Baseline implies a path under Proposed
//! - Returned paths are walkable: consecutive nodes always share an edge
//! - Paths start and end at the requested endpoints

use proptest::prelude::*;

use trustmesh_ledger::{LinkLedger, RoutingMode};

use crate::pathfinder::shortest_path;
use crate::topology::{build_graph, Point};

const RANGE: f64 = 120.0;

fn positions() -> impl Strategy<Value = Vec<Option<Point>>> {
    prop::collection::vec(
        prop_oneof![
            9 => (0.0f64..300.0, 0.0f64..300.0).prop_map(|(x, y)| Some(Point::new(x, y))),
            1 => Just(None),
        ],
        2..12,
    )
}

/// Synthetic drop histories: (a, b, count) triples applied to the ledger.
fn drop_history(max_node: u32) -> impl Strategy<Value = Vec<(u32, u32, u8)>> {
    prop::collection::vec(
        (0..max_node, 0..max_node, 0u8..6),
        0..10,
    )
}

proptest! {
    /// Edge inclusion depends only on geometry, never on trust: whenever
    /// Baseline finds a path, Proposed finds one too.
    #[test]
    fn proposed_preserves_baseline_connectivity(
        pos in positions(),
        history in drop_history(12),
        src in 0u32..12,
        dst in 0u32..12,
    ) {
        let mut ledger = LinkLedger::new();
        for (a, b, count) in history {
            if a != b {
                for _ in 0..count {
                    ledger.update(a, b, 0.0, true, true);
                }
            }
        }

        let baseline = build_graph(&pos, &ledger, RANGE, &RoutingMode::Baseline);
        let proposed = build_graph(&pos, &ledger, RANGE, &RoutingMode::proposed());

        let base_path = shortest_path(&baseline, src, dst);
        let prop_path = shortest_path(&proposed, src, dst);
        if !base_path.is_empty() {
            prop_assert!(!prop_path.is_empty());
        }
    }

    /// Every returned path is walkable edge by edge and spans the
    /// requested endpoints.
    #[test]
    fn paths_are_walkable(
        pos in positions(),
        src in 0u32..12,
        dst in 0u32..12,
    ) {
        let ledger = LinkLedger::new();
        let graph = build_graph(&pos, &ledger, RANGE, &RoutingMode::proposed());
        let path = shortest_path(&graph, src, dst);

        if !path.is_empty() {
            prop_assert_eq!(*path.first().unwrap(), src);
            prop_assert_eq!(*path.last().unwrap(), dst);
            for pair in path.windows(2) {
                prop_assert!(graph.weight(pair[0], pair[1]).is_some());
            }
        }
    }

    /// Identical inputs produce identical paths.
    #[test]
    fn pathfinding_is_deterministic(
        pos in positions(),
        src in 0u32..12,
        dst in 0u32..12,
    ) {
        let ledger = LinkLedger::new();
        let graph = build_graph(&pos, &ledger, RANGE, &RoutingMode::Baseline);
        let first = shortest_path(&graph, src, dst);
        let second = shortest_path(&graph, src, dst);
        prop_assert_eq!(first, second);
    }
}
