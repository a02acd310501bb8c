//! Property-based tests for the ledger invariants.
//!
//! These verify the behavioral contract holds for arbitrary update
//! sequences:
//!
//! - Trust stays inside `[trust_floor, 1.0]`
//! - Drops with trust enabled only ever lower trust
//! - Three or more drops pin trust to the floor exactly
//! - Baseline mode never touches trust
//! - The smoothed SNR stays between zero and the largest observation
//! - Both directions of a pair read the same record

use proptest::prelude::*;

use crate::ledger::{LinkLedger, DEFAULT_SNR, TRUST_FLOOR};

/// One synthetic transmission outcome.
#[derive(Clone, Debug)]
struct Observation {
    snr: f64,
    is_drop: bool,
}

fn observation() -> impl Strategy<Value = Observation> {
    (0.0f64..40.0, any::<bool>()).prop_map(|(snr, is_drop)| Observation { snr, is_drop })
}

fn observations() -> impl Strategy<Value = Vec<Observation>> {
    prop::collection::vec(observation(), 0..64)
}

proptest! {
    /// Trust stays within `[trust_floor, 1.0]` after any update sequence.
    #[test]
    fn trust_bounds_hold(obs in observations(), trust_enabled in any::<bool>()) {
        let mut ledger = LinkLedger::new();
        for o in &obs {
            ledger.update(0, 1, o.snr, o.is_drop, trust_enabled);
            let trust = ledger.trust(0, 1);
            prop_assert!(trust >= TRUST_FLOOR - 1e-12);
            prop_assert!(trust <= 1.0 + 1e-12);
        }
    }

    /// Repeated drops with trust enabled produce a non-increasing trust
    /// sequence.
    #[test]
    fn drops_decay_monotonically(count in 1usize..16) {
        let mut ledger = LinkLedger::new();
        let mut previous = ledger.trust(2, 3);
        for _ in 0..count {
            ledger.update(2, 3, 0.0, true, true);
            let current = ledger.trust(2, 3);
            prop_assert!(current <= previous);
            previous = current;
        }
    }

    /// Three or more drops pin trust to the floor exactly.
    #[test]
    fn floor_reached_after_three_drops(extra in 0usize..16) {
        let mut ledger = LinkLedger::new();
        for _ in 0..(3 + extra) {
            ledger.update(4, 5, 0.0, true, true);
        }
        prop_assert_eq!(ledger.trust(4, 5), TRUST_FLOOR);
    }

    /// With trust disabled, trust stays at 1.0 no matter what is observed.
    #[test]
    fn baseline_never_moves_trust(obs in observations()) {
        let mut ledger = LinkLedger::new();
        for o in &obs {
            ledger.update(6, 7, o.snr, o.is_drop, false);
            prop_assert_eq!(ledger.trust(6, 7), 1.0);
        }
    }

    /// The EMA never escapes `[0, max(observed)]`: it starts at zero and
    /// each step is a convex combination of the state and an observation.
    #[test]
    fn ema_stays_within_observed_range(obs in observations()) {
        let mut ledger = LinkLedger::new();
        let mut max_seen = 0.0f64;
        for o in &obs {
            ledger.update(8, 9, o.snr, o.is_drop, true);
            if o.snr > 0.0 {
                max_seen = max_seen.max(o.snr);
            }
            if max_seen > 0.0 {
                let avg = ledger.snr(8, 9);
                prop_assert!(avg >= 0.0);
                prop_assert!(avg <= max_seen + 1e-9);
            } else {
                // No positive observation yet: the default is reported.
                prop_assert_eq!(ledger.snr(8, 9), DEFAULT_SNR);
            }
        }
    }

    /// Both directions of a pair share one record.
    #[test]
    fn pair_access_is_symmetric(
        a in 0u32..32,
        b in 0u32..32,
        obs in observations(),
    ) {
        let mut ledger = LinkLedger::new();
        for o in &obs {
            ledger.update(a, b, o.snr, o.is_drop, true);
        }
        prop_assert_eq!(ledger.trust(a, b), ledger.trust(b, a));
        prop_assert_eq!(ledger.snr(a, b), ledger.snr(b, a));
        prop_assert_eq!(ledger.drops(a, b), ledger.drops(b, a));
    }

    /// Classification implies at least one incident link below the floor,
    /// so under the floored decay law it never fires from evidence alone.
    #[test]
    fn classification_implies_sub_floor_link(
        node in 0u32..8,
        obs in observations(),
    ) {
        let mut ledger = LinkLedger::new();
        for (i, o) in obs.iter().enumerate() {
            let peer = (node + 1 + (i as u32 % 7)) % 8;
            ledger.update(node, peer, o.snr, o.is_drop, true);
        }
        if ledger.is_dynamically_malicious(node) {
            let sub_floor = ledger
                .iter()
                .any(|(key, m)| key.involves(node) && m.trust < TRUST_FLOOR);
            prop_assert!(sub_floor);
        }
    }
}
