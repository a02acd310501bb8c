//! The simulation harness.
//!
//! Owns every mutable singleton (ledger, metrics, node container, event
//! queue) and runs the single-threaded event loop: flow applications
//! emit packets, packets walk installed host routes hop by hop, trace
//! taps feed the ledger, and the heartbeat periodically rebuilds the
//! routing plane. Control never leaves the loop; nothing here blocks or
//! yields.

use std::collections::BTreeSet;

use tracing::info;

use trustmesh_ledger::{LedgerConfig, LinkLedger, NodeId, RoutingMode};

use crate::config::{ConfigError, SimConfig};
use crate::event::{Event, Packet, PacketHeader, Scheduler, DEFAULT_TTL};
use crate::flows::{select_blackholes, select_flows, Flow};
use crate::heartbeat::HeartbeatController;
use crate::ingest::EvidenceIngestor;
use crate::metrics::Metrics;
use crate::mobility::Mobility;
use crate::radio;
use crate::rng::RngStreams;
use crate::time::SimTime;
use crate::trace;
use crate::world::NodeWorld;

/// What one completed run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Final counter values.
    pub metrics: Metrics,
    /// Heartbeat ticks executed.
    pub heartbeats: u64,
    /// The `[DROP_SUMMARY]` line.
    pub drop_summary: String,
    /// The `RESULT_DATA` line.
    pub result_line: String,
}

/// One configured simulation run.
pub struct Simulation {
    config: SimConfig,
    mode: RoutingMode,
    world: NodeWorld,
    ledger: LinkLedger,
    metrics: Metrics,
    scheduler: Scheduler,
    heartbeat: HeartbeatController,
    ingestor: EvidenceIngestor,
    flows: Vec<Flow>,
    blackholes: BTreeSet<NodeId>,
    next_packet_id: u64,
    end: SimTime,
    app_stop: SimTime,
    packet_interval: SimTime,
}

impl Simulation {
    /// Set up a run: select the malicious set and flows, place nodes,
    /// arm the heartbeat, and schedule each flow's first packet.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mode = config.mode();
        info!(
            mode = mode.label(),
            nodes = config.num_nodes,
            flows = config.num_flows,
            blackholes = config.num_blackholes,
            "configuring simulation"
        );

        let rngs = RngStreams::new(config.rng_seed, config.rng_run);

        let blackholes: BTreeSet<NodeId> = match &config.fixed_blackholes {
            Some(list) => list.iter().copied().collect(),
            None => select_blackholes(
                &mut rngs.blackholes(),
                config.num_nodes,
                config.num_blackholes,
            ),
        };
        for node in &blackholes {
            info!(node, "malicious node will silently drop forwarded traffic");
        }

        let flows = match &config.fixed_flows {
            Some(list) => list.clone(),
            None => select_flows(
                &mut rngs.flows(),
                config.num_nodes,
                &blackholes,
                config.num_flows,
            ),
        };
        for (index, flow) in flows.iter().enumerate() {
            info!(flow = index, source = flow.source, dest = flow.dest, "flow configured");
        }

        let mobility = Mobility::new(&config.mobility, config.num_nodes, &rngs);
        let world = NodeWorld::new(config.num_nodes, mobility);

        let ledger = LinkLedger::with_config(LedgerConfig {
            default_snr: config.default_snr,
            ..LedgerConfig::default()
        });

        let ingestor = EvidenceIngestor::new(
            config.max_radio_range,
            config.default_snr,
            mode.penalizes_drops(),
        );

        // Applications stop shortly before the end so in-flight packets
        // can settle; degenerate durations fall back to the full window.
        let app_start = SimTime::from_secs_f64(config.app_start_secs);
        let mut app_stop_secs = config.sim_time_secs - 0.1;
        if app_stop_secs <= config.app_start_secs {
            app_stop_secs = config.sim_time_secs;
        }

        let mut scheduler = Scheduler::new();
        scheduler.schedule(SimTime::ZERO, Event::Heartbeat);
        for index in 0..flows.len() {
            scheduler.schedule(app_start, Event::FlowSend { flow: index });
        }

        Ok(Self {
            mode,
            world,
            ledger,
            metrics: Metrics::new(),
            scheduler,
            heartbeat: HeartbeatController::new(SimTime::from_secs_f64(config.heartbeat_secs)),
            ingestor,
            flows,
            blackholes,
            next_packet_id: 0,
            end: SimTime::from_secs_f64(config.sim_time_secs),
            app_stop: SimTime::from_secs_f64(app_stop_secs),
            packet_interval: SimTime::from_secs_f64(config.packet_interval_secs),
            config,
        })
    }

    /// Run to completion and summarize.
    pub fn run(&mut self) -> RunSummary {
        while let Some((now, event)) = self.scheduler.pop() {
            if now >= self.end {
                break;
            }
            self.dispatch(now, event);
        }
        self.heartbeat.stop();

        // Evaluation-only sweep: report what the evidence alone singled
        // out, without ever feeding it back into routing.
        for node in 0..self.world.node_count() {
            if self.ledger.is_dynamically_malicious(node) {
                info!(node, "classified as malicious from drop evidence");
            }
        }

        RunSummary {
            heartbeats: self.heartbeat.ticks(),
            drop_summary: self.metrics.drop_summary(self.config.rng_run, &self.mode),
            result_line: self.metrics.result_line(self.config.rng_run, &self.mode),
            metrics: self.metrics.clone(),
        }
    }

    /// The run's configuration.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The routing mode in effect.
    #[must_use]
    pub fn mode(&self) -> &RoutingMode {
        &self.mode
    }

    /// The ledger's current state.
    #[must_use]
    pub fn ledger(&self) -> &LinkLedger {
        &self.ledger
    }

    /// The counters' current state.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The active flows.
    #[must_use]
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// The ground-truth malicious set.
    #[must_use]
    pub fn blackholes(&self) -> &BTreeSet<NodeId> {
        &self.blackholes
    }

    fn dispatch(&mut self, now: SimTime, event: Event) {
        match event {
            Event::Heartbeat => {
                let next = self.heartbeat.on_tick(
                    now,
                    &mut self.world,
                    &self.ledger,
                    &self.mode,
                    &self.flows,
                    &self.blackholes,
                    &mut self.metrics,
                    self.config.max_radio_range,
                );
                if let Some(at) = next {
                    self.scheduler.schedule(at, Event::Heartbeat);
                }
            }
            Event::FlowSend { flow } => self.on_flow_send(now, flow),
            Event::Arrival { node, packet } => self.on_arrival(now, node, packet),
        }
    }

    /// A flow application emits its next packet.
    fn on_flow_send(&mut self, now: SimTime, flow_index: usize) {
        let Some(flow) = self.flows.get(flow_index).copied() else {
            return;
        };
        if now > self.app_stop {
            return;
        }

        let (Some(source_addr), Some(dest_addr)) = (
            self.world.address_of(flow.source),
            self.world.address_of(flow.dest),
        ) else {
            return;
        };

        self.metrics.tx_packets += 1;
        let packet = Packet {
            id: self.next_packet_id,
            header: PacketHeader {
                source: source_addr,
                dest: dest_addr,
                ttl: DEFAULT_TTL,
            },
            size_bytes: self.config.packet_size_bytes,
            sent_at: now,
            forwards: 0,
        };
        self.next_packet_id += 1;

        self.route_packet(now, flow.source, packet);

        let next = now + self.packet_interval;
        if next <= self.app_stop {
            self.scheduler
                .schedule(next, Event::FlowSend { flow: flow_index });
        }
    }

    /// Look up the node's host route for the packet and transmit along
    /// it. No route is the network-layer drop; on a blackhole, the
    /// normal state of affairs.
    fn route_packet(&mut self, now: SimTime, at: NodeId, packet: Packet) {
        let entry = self
            .world
            .table(at)
            .and_then(|table| table.lookup(packet.header.dest))
            .copied();

        match entry {
            Some(entry) => match self.world.node_for_address(entry.next_hop) {
                Some(next) => self.transmit(now, at, next, packet),
                None => self.l3_drop(now, at, packet),
            },
            None => self.l3_drop(now, at, packet),
        }
    }

    /// One radio hop. In-range transmissions arrive after the hop delay;
    /// anything else is a PHY drop observed at the intended receiver.
    fn transmit(&mut self, now: SimTime, from: NodeId, to: NodeId, mut packet: Packet) {
        match self.world.distance(from, to, now) {
            Some(distance) if distance < self.config.max_radio_range => {
                packet.forwards += 1;
                let arrival = now + radio::hop_delay(distance, packet.size_bytes);
                self.scheduler.schedule(arrival, Event::Arrival { node: to, packet });
            }
            _ => {
                let context = trace::phy_drop_context(to);
                self.ingestor.on_phy_drop(
                    &context,
                    &mut self.world,
                    &mut self.ledger,
                    &mut self.metrics,
                    &self.flows,
                    now,
                );
            }
        }
    }

    /// A transmission completed: tap the reception, then deliver or
    /// forward.
    fn on_arrival(&mut self, now: SimTime, node: NodeId, mut packet: Packet) {
        let context = trace::phy_rx_context(node);
        self.ingestor
            .on_rx_ok(&context, &mut self.world, &mut self.ledger, &self.flows, now);

        if self.world.address_of(node) == Some(packet.header.dest) {
            self.metrics.rx_packets += 1;
            self.metrics.delay_sum += now.saturating_sub(packet.sent_at);
            self.metrics.forwarded_hops += u64::from(packet.forwards);
            return;
        }

        if packet.header.ttl <= 1 {
            self.l3_drop(now, node, packet);
            return;
        }
        packet.header.ttl -= 1;
        self.route_packet(now, node, packet);
    }

    fn l3_drop(&mut self, now: SimTime, node: NodeId, packet: Packet) {
        let context = trace::l3_drop_context(node);
        self.ingestor.on_l3_drop(
            &context,
            &packet.header,
            &mut self.world,
            &mut self.ledger,
            &mut self.metrics,
            &self.blackholes,
            now,
        );
    }
}

/// Run one configured campaign, for callers that need nothing but the
/// summary.
pub fn run_campaign(config: SimConfig) -> Result<RunSummary, ConfigError> {
    let mut simulation = Simulation::new(config)?;
    Ok(simulation.run())
}
