//! Trace context paths.
//!
//! The evidence taps receive an opaque context string identifying where
//! in the node tree an event fired, in the form
//! `/NodeList/<id>/...`. The receiving node id is recovered by parsing
//! that prefix; anything malformed is rejected and the event is dropped
//! by the caller.

use trustmesh_ledger::NodeId;

/// Context path for a successful reception at `node`.
#[must_use]
pub fn phy_rx_context(node: NodeId) -> String {
    format!("/NodeList/{node}/DeviceList/0/Phy/RxEnd")
}

/// Context path for a PHY-layer drop at `node`.
#[must_use]
pub fn phy_drop_context(node: NodeId) -> String {
    format!("/NodeList/{node}/DeviceList/0/Phy/RxDrop")
}

/// Context path for a network-layer drop at `node`.
#[must_use]
pub fn l3_drop_context(node: NodeId) -> String {
    format!("/NodeList/{node}/L3/Drop")
}

/// Parse the node id out of a `/NodeList/<id>/...` context path.
///
/// Returns `None` when the marker is missing, the id is not terminated by
/// a further path segment, or it does not parse as a node id.
#[must_use]
pub fn parse_node_id(context: &str) -> Option<NodeId> {
    const MARKER: &str = "/NodeList/";
    let start = context.find(MARKER)? + MARKER.len();
    let rest = &context[start..];
    let end = rest.find('/')?;
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        assert_eq!(parse_node_id(&phy_rx_context(5)), Some(5));
        assert_eq!(parse_node_id(&phy_drop_context(0)), Some(0));
        assert_eq!(parse_node_id(&l3_drop_context(29)), Some(29));
    }

    #[test]
    fn test_parse_deep_path() {
        assert_eq!(
            parse_node_id("/NodeList/12/DeviceList/0/Phy/State/RxError"),
            Some(12)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_node_id(""), None);
        assert_eq!(parse_node_id("/DeviceList/0/Phy"), None);
        assert_eq!(parse_node_id("/NodeList/7"), None); // no trailing segment
        assert_eq!(parse_node_id("/NodeList/x/Phy"), None);
        assert_eq!(parse_node_id("/NodeList//Phy"), None);
    }
}
