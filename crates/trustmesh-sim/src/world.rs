//! The node container: addressing, interfaces, route tables, positions.

use std::net::Ipv4Addr;

use trustmesh_ledger::NodeId;
use trustmesh_routing::{HostRouteTable, InterfaceId, Point};

use crate::mobility::Mobility;
use crate::time::SimTime;

/// Interface id of each node's single radio. Interface `0` is loopback.
pub const WIFI_INTERFACE: InterfaceId = 1;

/// Base of the simulation's address block, `10.1.0.0/16`.
const ADDRESS_BASE: u32 = 0x0A01_0000;

/// Everything per-node the simulation owns: addresses assigned from one
/// block, a host route table per node, and the mobility state answering
/// position queries.
pub struct NodeWorld {
    addresses: Vec<Ipv4Addr>,
    tables: Vec<HostRouteTable>,
    mobility: Mobility,
}

impl NodeWorld {
    /// Create a world of `num_nodes` nodes with sequential addresses.
    #[must_use]
    pub fn new(num_nodes: u32, mobility: Mobility) -> Self {
        let addresses = (0..num_nodes)
            .map(|i| Ipv4Addr::from(ADDRESS_BASE + i + 1))
            .collect();
        let tables = (0..num_nodes).map(|_| HostRouteTable::new()).collect();
        Self {
            addresses,
            tables,
            mobility,
        }
    }

    /// Number of nodes in the container.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        self.addresses.len() as u32
    }

    /// Whether `node` names a node in the container.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.addresses.len()
    }

    /// The node's address.
    #[must_use]
    pub fn address_of(&self, node: NodeId) -> Option<Ipv4Addr> {
        self.addresses.get(node as usize).copied()
    }

    /// Reverse lookup in the node/address map.
    #[must_use]
    pub fn node_for_address(&self, addr: Ipv4Addr) -> Option<NodeId> {
        self.addresses
            .iter()
            .position(|a| *a == addr)
            .map(|i| i as NodeId)
    }

    /// The node's radio interface, if the node exists.
    #[must_use]
    pub fn interface_for(&self, node: NodeId) -> Option<InterfaceId> {
        self.contains(node).then_some(WIFI_INTERFACE)
    }

    /// The node's route table.
    #[must_use]
    pub fn table(&self, node: NodeId) -> Option<&HostRouteTable> {
        self.tables.get(node as usize)
    }

    /// The node's route table, mutably.
    pub fn table_mut(&mut self, node: NodeId) -> Option<&mut HostRouteTable> {
        self.tables.get_mut(node as usize)
    }

    /// The node's position at `now`, if it has one.
    pub fn position(&mut self, node: NodeId, now: SimTime) -> Option<Point> {
        if !self.contains(node) {
            return None;
        }
        self.mobility.position(node, now)
    }

    /// Positions of every node at `now`, indexed by id.
    pub fn positions(&mut self, now: SimTime) -> Vec<Option<Point>> {
        (0..self.node_count())
            .map(|node| self.mobility.position(node, now))
            .collect()
    }

    /// Euclidean distance between two nodes at `now`, if both have
    /// positions.
    pub fn distance(&mut self, a: NodeId, b: NodeId, now: SimTime) -> Option<f64> {
        let pa = self.position(a, now)?;
        let pb = self.position(b, now)?;
        Some(pa.distance(&pb))
    }
}
