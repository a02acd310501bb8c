//! Fuzz target for ledger update sequences.
//!
//! Feeds arbitrary observation sequences into the ledger and checks the
//! trust bounds hold throughout.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trustmesh_ledger::{LinkLedger, TRUST_FLOOR};

fuzz_target!(|data: &[u8]| {
    let mut ledger = LinkLedger::new();

    for chunk in data.chunks(4) {
        let &[a, b, snr, flags] = chunk else { break };
        let snr = f64::from(snr) / 4.0;
        let is_drop = flags & 1 != 0;
        let trust_enabled = flags & 2 != 0;

        ledger.update(u32::from(a), u32::from(b), snr, is_drop, trust_enabled);

        let trust = ledger.trust(u32::from(a), u32::from(b));
        assert!((TRUST_FLOOR..=1.0).contains(&trust));
        assert!(ledger.snr(u32::from(a), u32::from(b)) > 0.0);
    }
});
