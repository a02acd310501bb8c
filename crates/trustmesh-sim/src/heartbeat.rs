//! The periodic control-plane tick.
//!
//! A single timer drives the whole routing plane: every tick rebuilds the
//! topology from current positions and ledger state, recomputes a path
//! per flow, and installs the resulting next hops. The graph lives only
//! inside the tick.

use std::collections::BTreeSet;

use tracing::debug;

use trustmesh_ledger::{LinkLedger, NodeId, RoutingMode};
use trustmesh_routing::{build_graph, shortest_path};

use crate::flows::Flow;
use crate::install::install_route;
use crate::metrics::Metrics;
use crate::time::SimTime;
use crate::world::NodeWorld;

/// Default interval between ticks: short enough to track pedestrian
/// mobility, long enough to amortize the per-flow path computation.
pub const HEARTBEAT_INTERVAL: SimTime = SimTime::from_millis(100);

/// Where the controller is in its tick cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartbeatState {
    /// Waiting for the next scheduled tick.
    Armed,
    /// Mid-tick: rebuilding topology and installing routes.
    Running,
    /// Simulation over; no further ticks fire.
    Stopped,
}

/// The heartbeat state machine.
pub struct HeartbeatController {
    state: HeartbeatState,
    interval: SimTime,
    ticks: u64,
}

impl HeartbeatController {
    /// Create an armed controller with the given tick interval.
    #[must_use]
    pub fn new(interval: SimTime) -> Self {
        Self {
            state: HeartbeatState::Armed,
            interval,
            ticks: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> HeartbeatState {
        self.state
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Stop the controller; pending ticks become no-ops.
    pub fn stop(&mut self) {
        self.state = HeartbeatState::Stopped;
    }

    /// Execute one tick: topology, paths, installation.
    ///
    /// Returns when the next tick should fire, or `None` once stopped.
    #[allow(clippy::too_many_arguments)]
    pub fn on_tick(
        &mut self,
        now: SimTime,
        world: &mut NodeWorld,
        ledger: &LinkLedger,
        mode: &RoutingMode,
        flows: &[Flow],
        blackholes: &BTreeSet<NodeId>,
        metrics: &mut Metrics,
        max_range: f64,
    ) -> Option<SimTime> {
        if self.state == HeartbeatState::Stopped {
            return None;
        }
        self.state = HeartbeatState::Running;

        let positions = world.positions(now);
        let graph = build_graph(&positions, ledger, max_range, mode);

        for flow in flows {
            let path = shortest_path(&graph, flow.source, flow.dest);
            debug!(source = flow.source, dest = flow.dest, ?path, "heartbeat path");
            if path.len() > 1 {
                install_route(world, metrics, blackholes, flow.dest, &path);
            }
        }

        self.ticks += 1;
        self.state = HeartbeatState::Armed;
        Some(now + self.interval)
    }
}
