//! Radio link model.
//!
//! Stands in for the PHY layer at its interface: whether a transmission
//! at a given distance is delivered, how long a hop takes, and the
//! distance-based SNR estimate fed to the ledger. Receptions in the
//! underlying trace do not expose SNR directly, so the estimator provides
//! a deterministic, monotone-in-distance stand-in.

use crate::time::SimTime;

/// Link data rate in bits per second.
pub const DATA_RATE_BPS: f64 = 100_000_000.0;

/// Fixed per-hop medium-access overhead.
pub const MAC_OVERHEAD_MICROS: u64 = 500;

/// Propagation speed in meters per second.
pub const PROPAGATION_MPS: f64 = 299_792_458.0;

/// Minimum SNR the estimator will report.
pub const MIN_ESTIMATED_SNR: f64 = 5.0;

/// Time for one hop: MAC overhead, serialization, propagation.
#[must_use]
pub fn hop_delay(distance_m: f64, size_bytes: u32) -> SimTime {
    let serialization = f64::from(size_bytes) * 8.0 / DATA_RATE_BPS;
    let propagation = distance_m.max(0.0) / PROPAGATION_MPS;
    SimTime::from_micros(MAC_OVERHEAD_MICROS) + SimTime::from_secs_f64(serialization + propagation)
}

/// Estimate link SNR from distance: linear falloff from `default_snr`,
/// one dB per ten meters, clamped to `[MIN_ESTIMATED_SNR, default_snr]`.
#[must_use]
pub fn estimate_snr(distance_m: f64, default_snr: f64) -> f64 {
    (default_snr - distance_m / 10.0).clamp(MIN_ESTIMATED_SNR, default_snr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_delay_components() {
        // 1024 bytes at 100 Mbit/s is 81.92 us of serialization.
        let delay = hop_delay(0.0, 1024);
        assert_eq!(delay.as_nanos(), 500_000 + 81_920);
    }

    #[test]
    fn test_hop_delay_grows_with_distance() {
        assert!(hop_delay(1000.0, 1024) > hop_delay(10.0, 1024));
    }

    #[test]
    fn test_estimate_snr_falloff() {
        assert_eq!(estimate_snr(0.0, 20.0), 20.0);
        assert_eq!(estimate_snr(50.0, 20.0), 15.0);
        assert_eq!(estimate_snr(100.0, 20.0), 10.0);
    }

    #[test]
    fn test_estimate_snr_clamped() {
        // Far links clamp to the minimum, never below.
        assert_eq!(estimate_snr(500.0, 20.0), MIN_ESTIMATED_SNR);
        // Negative distance cannot exceed the default.
        assert_eq!(estimate_snr(-10.0, 20.0), 20.0);
    }
}
