//! Evaluation counters and result emission.
//!
//! The counters are pure output: reset at simulation start, written by
//! the evidence ingestor and route installer, and read only when the run
//! summary is emitted. No algorithmic path consults them.

use trustmesh_ledger::RoutingMode;

use crate::time::SimTime;

/// Monotonic evaluation counters plus per-flow delivery accounting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Packets discarded by the radio layer.
    pub phy_drops: u64,
    /// Packets discarded at the network layer.
    pub l3_drops: u64,
    /// Network-layer drops at ground-truth malicious nodes.
    pub blackhole_l3_drops: u64,
    /// Route installations skipped on ground-truth malicious nodes.
    pub route_skips: u64,
    /// Trust penalties applied by the ledger.
    pub trust_penalties: u64,
    /// Anticipated-plus-observed drops attributed to malicious nodes.
    ///
    /// Incremented both per blackhole L3 drop and per skipped
    /// installation, without deduplication, so it is a loose upper
    /// bound, kept that way for output compatibility.
    pub malicious_drops: u64,

    /// Packets handed to the network by flow sources.
    pub tx_packets: u64,
    /// Packets delivered to their flow destination.
    pub rx_packets: u64,
    /// Sum of end-to-end delays over delivered packets.
    pub delay_sum: SimTime,
    /// Sum of radio hops over delivered packets.
    pub forwarded_hops: u64,
}

impl Metrics {
    /// Fresh, all-zero counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Packet delivery ratio as a percentage.
    #[must_use]
    pub fn pdr_percent(&self) -> f64 {
        if self.tx_packets == 0 {
            return 0.0;
        }
        self.rx_packets as f64 / self.tx_packets as f64 * 100.0
    }

    /// Mean end-to-end latency of delivered packets, in milliseconds.
    #[must_use]
    pub fn avg_latency_ms(&self) -> f64 {
        if self.rx_packets == 0 {
            return 0.0;
        }
        self.delay_sum.as_millis_f64() / self.rx_packets as f64
    }

    /// Mean radio hops per delivered packet.
    #[must_use]
    pub fn avg_hops(&self) -> f64 {
        if self.rx_packets == 0 {
            return 0.0;
        }
        self.forwarded_hops as f64 / self.rx_packets as f64
    }

    /// The human-scannable drop breakdown line.
    #[must_use]
    pub fn drop_summary(&self, run: u64, mode: &RoutingMode) -> String {
        format!(
            "[DROP_SUMMARY] RunID={} | Mode={} | PHYDrops={} | L3Drops={} | \
             BlackholeL3Drops={} | RouteSkips={} | TrustPenalties={} | MaliciousDrops={}",
            run,
            mode.label(),
            self.phy_drops,
            self.l3_drops,
            self.blackhole_l3_drops,
            self.route_skips,
            self.trust_penalties,
            self.malicious_drops,
        )
    }

    /// The machine-readable result line.
    #[must_use]
    pub fn result_line(&self, run: u64, mode: &RoutingMode) -> String {
        format!(
            "RESULT_DATA, {}, {}, {:.2}, {:.2}, {:.2}, {}",
            run,
            mode.flag(),
            self.pdr_percent(),
            self.avg_latency_ms(),
            self.avg_hops(),
            self.malicious_drops,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_with_no_traffic() {
        let metrics = Metrics::new();
        assert_eq!(metrics.pdr_percent(), 0.0);
        assert_eq!(metrics.avg_latency_ms(), 0.0);
        assert_eq!(metrics.avg_hops(), 0.0);
    }

    #[test]
    fn test_ratios() {
        let metrics = Metrics {
            tx_packets: 200,
            rx_packets: 150,
            delay_sum: SimTime::from_millis(300),
            forwarded_hops: 450,
            ..Metrics::new()
        };
        assert!((metrics.pdr_percent() - 75.0).abs() < 1e-9);
        assert!((metrics.avg_latency_ms() - 2.0).abs() < 1e-9);
        assert!((metrics.avg_hops() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_line_format() {
        let metrics = Metrics {
            tx_packets: 100,
            rx_packets: 50,
            delay_sum: SimTime::from_millis(125),
            forwarded_hops: 100,
            malicious_drops: 7,
            ..Metrics::new()
        };
        assert_eq!(
            metrics.result_line(3, &RoutingMode::proposed()),
            "RESULT_DATA, 3, 1, 50.00, 2.50, 2.00, 7"
        );
        assert_eq!(
            metrics.result_line(3, &RoutingMode::Baseline),
            "RESULT_DATA, 3, 0, 50.00, 2.50, 2.00, 7"
        );
    }

    #[test]
    fn test_drop_summary_format() {
        let metrics = Metrics {
            phy_drops: 1,
            l3_drops: 2,
            blackhole_l3_drops: 3,
            route_skips: 4,
            trust_penalties: 5,
            malicious_drops: 6,
            ..Metrics::new()
        };
        assert_eq!(
            metrics.drop_summary(2, &RoutingMode::Baseline),
            "[DROP_SUMMARY] RunID=2 | Mode=Baseline | PHYDrops=1 | L3Drops=2 | \
             BlackholeL3Drops=3 | RouteSkips=4 | TrustPenalties=5 | MaliciousDrops=6"
        );
    }

    #[test]
    fn test_reset() {
        let mut metrics = Metrics {
            tx_packets: 10,
            route_skips: 3,
            ..Metrics::new()
        };
        metrics.reset();
        assert_eq!(metrics, Metrics::new());
    }
}
