//! Fuzz target for trace context parsing.
//!
//! Tests that arbitrary context paths are handled safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trustmesh_sim::trace::{parse_node_id, phy_rx_context};

fuzz_target!(|data: &[u8]| {
    // Try to interpret input as a context path
    if let Ok(s) = std::str::from_utf8(data) {
        // Should return Some for well-formed paths, None otherwise - never panic
        let result = parse_node_id(s);

        // If successful, verify roundtrip through a generated context
        if let Some(node) = result {
            let context = phy_rx_context(node);
            assert_eq!(parse_node_id(&context), Some(node));
        }
    }
});
