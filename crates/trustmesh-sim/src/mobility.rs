//! Node mobility.
//!
//! Positions are queried lazily: the model advances a node's motion state
//! on demand up to the queried instant. Because the event loop is single
//! threaded and deterministic, the sequence of queries (and therefore of
//! waypoint draws) is identical across runs with the same seed.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use trustmesh_ledger::NodeId;
use trustmesh_routing::Point;

use crate::rng::RngStreams;
use crate::time::SimTime;

/// How nodes move for the duration of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MobilityConfig {
    /// Nodes pinned at fixed positions; node `i` takes `positions[i]`.
    /// Nodes beyond the list have no position and join no links.
    Static {
        /// One position per node.
        positions: Vec<Point>,
    },
    /// Random waypoint inside a square arena: pick a point, walk to it at
    /// a uniform-random speed, pause, repeat.
    RandomWaypoint {
        /// Side length of the square arena in meters.
        area_side: f64,
        /// Minimum walking speed in m/s.
        min_speed: f64,
        /// Maximum walking speed in m/s.
        max_speed: f64,
        /// Pause at each waypoint in seconds.
        pause_secs: f64,
    },
}

impl Default for MobilityConfig {
    fn default() -> Self {
        // Pedestrian speeds over the dense-network arena.
        Self::RandomWaypoint {
            area_side: 300.0,
            min_speed: 1.0,
            max_speed: 5.0,
            pause_secs: 1.0,
        }
    }
}

/// One motion segment: travel from `from` to `to` over `[depart, arrive]`.
/// A pause is a segment with `from == to`.
#[derive(Clone, Copy, Debug)]
struct Leg {
    from: Point,
    to: Point,
    depart: SimTime,
    arrive: SimTime,
}

impl Leg {
    fn position_at(&self, now: SimTime) -> Point {
        if now <= self.depart || self.arrive <= self.depart {
            return self.from;
        }
        if now >= self.arrive {
            return self.to;
        }
        let span = self.arrive.saturating_sub(self.depart).as_secs_f64();
        let frac = now.saturating_sub(self.depart).as_secs_f64() / span;
        Point::new(
            self.from.x + (self.to.x - self.from.x) * frac,
            self.from.y + (self.to.y - self.from.y) * frac,
        )
    }
}

enum Model {
    Static {
        positions: Vec<Point>,
    },
    Waypoint {
        area_side: f64,
        min_speed: f64,
        max_speed: f64,
        pause: SimTime,
        legs: Vec<Leg>,
        x_rng: ChaCha8Rng,
        y_rng: ChaCha8Rng,
        motion_rng: ChaCha8Rng,
    },
}

/// Runtime mobility state for the whole node container.
pub struct Mobility {
    model: Model,
}

impl Mobility {
    /// Instantiate the configured model for `num_nodes` nodes.
    #[must_use]
    pub fn new(config: &MobilityConfig, num_nodes: u32, rngs: &RngStreams) -> Self {
        let model = match config {
            MobilityConfig::Static { positions } => Model::Static {
                positions: positions.clone(),
            },
            MobilityConfig::RandomWaypoint {
                area_side,
                min_speed,
                max_speed,
                pause_secs,
            } => {
                let mut x_rng = rngs.position_x();
                let mut y_rng = rngs.position_y();
                let pause = SimTime::from_secs_f64(*pause_secs);
                // Every node starts paused at its allocated position.
                let legs = (0..num_nodes)
                    .map(|_| {
                        let start = Point::new(
                            x_rng.gen_range(0.0..*area_side),
                            y_rng.gen_range(0.0..*area_side),
                        );
                        Leg {
                            from: start,
                            to: start,
                            depart: SimTime::ZERO,
                            arrive: pause,
                        }
                    })
                    .collect();
                Model::Waypoint {
                    area_side: *area_side,
                    min_speed: *min_speed,
                    max_speed: *max_speed,
                    pause,
                    legs,
                    x_rng,
                    y_rng,
                    motion_rng: rngs.motion(),
                }
            }
        };
        Self { model }
    }

    /// The node's position at `now`, or `None` if the node has no
    /// mobility state.
    pub fn position(&mut self, node: NodeId, now: SimTime) -> Option<Point> {
        match &mut self.model {
            Model::Static { positions } => positions.get(node as usize).copied(),
            Model::Waypoint {
                area_side,
                min_speed,
                max_speed,
                pause,
                legs,
                x_rng,
                y_rng,
                motion_rng,
            } => {
                let leg = legs.get_mut(node as usize)?;
                while now >= leg.arrive {
                    *leg = if leg.from == leg.to {
                        // Pause over: walk to a fresh waypoint.
                        let target = Point::new(
                            x_rng.gen_range(0.0..*area_side),
                            y_rng.gen_range(0.0..*area_side),
                        );
                        let speed = motion_rng.gen_range(*min_speed..=*max_speed);
                        let travel = leg.to.distance(&target) / speed;
                        Leg {
                            from: leg.to,
                            to: target,
                            depart: leg.arrive,
                            arrive: leg.arrive + SimTime::from_secs_f64(travel),
                        }
                    } else {
                        // Arrived: pause at the waypoint.
                        Leg {
                            from: leg.to,
                            to: leg.to,
                            depart: leg.arrive,
                            arrive: leg.arrive + *pause,
                        }
                    };
                }
                Some(leg.position_at(now))
            }
        }
    }
}
