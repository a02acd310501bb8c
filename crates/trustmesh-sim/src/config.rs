//! Simulation configuration.
//!
//! Plain data with documented defaults, a fluent builder, and validation
//! that rejects nonsense before the event loop ever starts. Command-line
//! parse failures abort upstream; everything that reaches `validate` is
//! checked here.

use serde::{Deserialize, Serialize};

use trustmesh_ledger::{NodeId, RoutingMode, DEFAULT_ALPHA, DEFAULT_BETA, TRUST_FLOOR};

use crate::flows::Flow;
use crate::heartbeat::HEARTBEAT_INTERVAL;
use crate::mobility::MobilityConfig;

/// Default node population.
pub const DEFAULT_NUM_NODES: u32 = 30;

/// Default number of UDP flows.
pub const DEFAULT_NUM_FLOWS: u32 = 10;

/// Default size of the ground-truth malicious set.
pub const DEFAULT_NUM_BLACKHOLES: u32 = 7;

/// Default simulated duration in seconds.
pub const DEFAULT_SIM_TIME_SECS: f64 = 60.0;

/// Default edge-inclusion threshold in meters.
pub const DEFAULT_MAX_RADIO_RANGE: f64 = 150.0;

/// Default fallback SNR in dB.
pub const DEFAULT_SNR_DB: f64 = 20.0;

/// Default application start time in seconds; gives the first heartbeats
/// time to populate route tables.
pub const DEFAULT_APP_START_SECS: f64 = 1.0;

/// Default inter-packet interval per flow, in seconds.
pub const DEFAULT_PACKET_INTERVAL_SECS: f64 = 0.1;

/// Default packet payload size in bytes.
pub const DEFAULT_PACKET_SIZE_BYTES: u32 = 1024;

/// Full configuration of one simulation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Nodes in the network.
    pub num_nodes: u32,
    /// UDP flows with unique endpoints disjoint from the malicious set.
    pub num_flows: u32,
    /// Size of the ground-truth malicious set.
    pub num_blackholes: u32,
    /// Simulated duration in seconds.
    pub sim_time_secs: f64,
    /// Edge-inclusion threshold in meters.
    pub max_radio_range: f64,
    /// Fallback SNR for links without signal history, in dB.
    pub default_snr: f64,
    /// RNG seed.
    pub rng_seed: u64,
    /// RNG stream selector; also salts position, blackhole, and flow
    /// draws.
    pub rng_run: u64,
    /// Proposed (trust-weighted) when true, Baseline (hop count) when
    /// false.
    pub use_blockchain: bool,
    /// Weight of the signal-quality cost term.
    pub alpha: f64,
    /// Weight of the trust cost term.
    pub beta: f64,
    /// Application start time in seconds.
    pub app_start_secs: f64,
    /// Inter-packet interval per flow, in seconds.
    pub packet_interval_secs: f64,
    /// Packet payload size in bytes.
    pub packet_size_bytes: u32,
    /// Heartbeat interval in seconds.
    pub heartbeat_secs: f64,
    /// How nodes move.
    pub mobility: MobilityConfig,
    /// Scenario override: use exactly these malicious nodes instead of
    /// sampling `num_blackholes` of them.
    pub fixed_blackholes: Option<Vec<NodeId>>,
    /// Scenario override: use exactly these flows instead of sampling
    /// `num_flows` of them.
    pub fixed_flows: Option<Vec<Flow>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_nodes: DEFAULT_NUM_NODES,
            num_flows: DEFAULT_NUM_FLOWS,
            num_blackholes: DEFAULT_NUM_BLACKHOLES,
            sim_time_secs: DEFAULT_SIM_TIME_SECS,
            max_radio_range: DEFAULT_MAX_RADIO_RANGE,
            default_snr: DEFAULT_SNR_DB,
            rng_seed: 1,
            rng_run: 1,
            use_blockchain: true,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            app_start_secs: DEFAULT_APP_START_SECS,
            packet_interval_secs: DEFAULT_PACKET_INTERVAL_SECS,
            packet_size_bytes: DEFAULT_PACKET_SIZE_BYTES,
            heartbeat_secs: HEARTBEAT_INTERVAL.as_secs_f64(),
            mobility: MobilityConfig::default(),
            fixed_blackholes: None,
            fixed_flows: None,
        }
    }
}

impl SimConfig {
    /// A configuration builder.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::new()
    }

    /// The routing mode this configuration selects.
    #[must_use]
    pub fn mode(&self) -> RoutingMode {
        if self.use_blockchain {
            RoutingMode::Proposed {
                alpha: self.alpha,
                beta: self.beta,
                trust_floor: TRUST_FLOOR,
            }
        } else {
            RoutingMode::Baseline
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &str, reason: &str) -> ConfigError {
            ConfigError::InvalidValue {
                field: field.into(),
                reason: reason.into(),
            }
        }

        if self.num_nodes == 0 {
            return Err(invalid("num_nodes", "at least one node is required"));
        }
        if self.fixed_blackholes.is_none() && self.num_blackholes >= self.num_nodes {
            return Err(invalid(
                "num_blackholes",
                "at least one honest node is required",
            ));
        }
        if self.sim_time_secs <= 0.0 {
            return Err(invalid("sim_time_secs", "duration must be positive"));
        }
        if self.max_radio_range <= 0.0 {
            return Err(invalid("max_radio_range", "range must be positive"));
        }
        if self.default_snr <= 0.0 {
            return Err(invalid("default_snr", "SNR must be positive"));
        }
        if self.alpha <= 0.0 || self.beta <= 0.0 {
            return Err(invalid("alpha/beta", "cost weights must be positive"));
        }
        if self.packet_interval_secs <= 0.0 {
            return Err(invalid(
                "packet_interval_secs",
                "packet interval must be positive",
            ));
        }
        if self.packet_size_bytes == 0 {
            return Err(invalid("packet_size_bytes", "packets cannot be empty"));
        }
        if self.heartbeat_secs <= 0.0 {
            return Err(invalid("heartbeat_secs", "heartbeat must be positive"));
        }
        if self.app_start_secs < 0.0 {
            return Err(invalid("app_start_secs", "start time cannot be negative"));
        }
        if let Some(blackholes) = &self.fixed_blackholes {
            if blackholes.iter().any(|n| *n >= self.num_nodes) {
                return Err(invalid("fixed_blackholes", "node id out of range"));
            }
            if blackholes.len() >= self.num_nodes as usize {
                return Err(invalid(
                    "fixed_blackholes",
                    "at least one honest node is required",
                ));
            }
        }
        if let Some(flows) = &self.fixed_flows {
            for flow in flows {
                if flow.source >= self.num_nodes || flow.dest >= self.num_nodes {
                    return Err(invalid("fixed_flows", "endpoint out of range"));
                }
                if flow.source == flow.dest {
                    return Err(invalid("fixed_flows", "endpoints must differ"));
                }
            }
        }
        if let MobilityConfig::RandomWaypoint {
            area_side,
            min_speed,
            max_speed,
            pause_secs,
        } = &self.mobility
        {
            if *area_side <= 0.0 {
                return Err(invalid("mobility.area_side", "arena must be positive"));
            }
            if *min_speed <= 0.0 || *max_speed < *min_speed {
                return Err(invalid(
                    "mobility.speed",
                    "speeds must satisfy 0 < min <= max",
                ));
            }
            if *pause_secs <= 0.0 {
                return Err(invalid("mobility.pause_secs", "pause must be positive"));
            }
        }

        Ok(())
    }
}

/// Builder for [`SimConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimConfigBuilder {
    config: SimConfig,
}

impl SimConfigBuilder {
    /// Start from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
        }
    }

    /// Build the final configuration.
    #[must_use]
    pub fn build(self) -> SimConfig {
        self.config
    }

    /// Build and validate.
    pub fn build_validated(self) -> Result<SimConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }

    /// Set the node population.
    #[must_use]
    pub fn with_num_nodes(mut self, num_nodes: u32) -> Self {
        self.config.num_nodes = num_nodes;
        self
    }

    /// Set the flow count.
    #[must_use]
    pub fn with_num_flows(mut self, num_flows: u32) -> Self {
        self.config.num_flows = num_flows;
        self
    }

    /// Set the malicious-set size.
    #[must_use]
    pub fn with_num_blackholes(mut self, num_blackholes: u32) -> Self {
        self.config.num_blackholes = num_blackholes;
        self
    }

    /// Set the simulated duration in seconds.
    #[must_use]
    pub fn with_sim_time_secs(mut self, secs: f64) -> Self {
        self.config.sim_time_secs = secs;
        self
    }

    /// Set the radio range in meters.
    #[must_use]
    pub fn with_max_radio_range(mut self, range: f64) -> Self {
        self.config.max_radio_range = range;
        self
    }

    /// Set the fallback SNR.
    #[must_use]
    pub fn with_default_snr(mut self, snr: f64) -> Self {
        self.config.default_snr = snr;
        self
    }

    /// Set seed and run.
    #[must_use]
    pub fn with_rng(mut self, seed: u64, run: u64) -> Self {
        self.config.rng_seed = seed;
        self.config.rng_run = run;
        self
    }

    /// Select Proposed (true) or Baseline (false).
    #[must_use]
    pub fn with_use_blockchain(mut self, enabled: bool) -> Self {
        self.config.use_blockchain = enabled;
        self
    }

    /// Set the cost weights.
    #[must_use]
    pub fn with_cost_weights(mut self, alpha: f64, beta: f64) -> Self {
        self.config.alpha = alpha;
        self.config.beta = beta;
        self
    }

    /// Set the mobility model.
    #[must_use]
    pub fn with_mobility(mut self, mobility: MobilityConfig) -> Self {
        self.config.mobility = mobility;
        self
    }

    /// Pin nodes at fixed positions.
    #[must_use]
    pub fn with_static_positions(self, positions: Vec<trustmesh_routing::Point>) -> Self {
        self.with_mobility(MobilityConfig::Static { positions })
    }

    /// Pin the malicious set for a scripted scenario.
    #[must_use]
    pub fn with_fixed_blackholes(mut self, blackholes: Vec<NodeId>) -> Self {
        self.config.fixed_blackholes = Some(blackholes);
        self
    }

    /// Pin the flow list for a scripted scenario.
    #[must_use]
    pub fn with_fixed_flows(mut self, flows: Vec<Flow>) -> Self {
        self.config.fixed_flows = Some(flows);
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// The reason it's invalid.
        reason: String,
    },
}
