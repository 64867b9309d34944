//! Eligibility filter over fetched report entries.

use tracing::warn;

use crate::records::RawNode;

/// Ports of entries explicitly marked `eligible: false`, in report order.
///
/// Duplicates are preserved: each occurrence is a distinct restart
/// intent from the authority at fetch time. Entries failing any shape
/// condition are skipped with a warning, not an error.
pub fn ineligible_ports(nodes: &[RawNode]) -> Vec<u16> {
    let mut ports = Vec::new();

    for (position, node) in nodes.iter().enumerate() {
        let Some(record) = node.record() else {
            warn!(position, "report entry has no usable source object, skipping");
            continue;
        };

        if record.eligible != Some(false) {
            continue;
        }

        match record.port {
            Some(port) => ports.push(port),
            None => warn!(position, "ineligible entry carries no port, skipping"),
        }
    }

    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn nodes(sources: Vec<Value>) -> Vec<RawNode> {
        sources
            .into_iter()
            .map(|source| RawNode {
                source: Some(source),
            })
            .collect()
    }

    #[test]
    fn keeps_only_explicitly_ineligible() {
        let nodes = nodes(vec![
            json!({"eligible": true, "ipAndDns": {"port": 9000}}),
            json!({"ipAndDns": {"port": 3005}}),
            json!({"eligible": false, "ipAndDns": {"port": 3006}}),
        ]);
        assert_eq!(ineligible_ports(&nodes), vec![3006]);
    }

    #[test]
    fn all_eligible_yields_empty() {
        let nodes = nodes(vec![
            json!({"eligible": true, "ipAndDns": {"port": 3005}}),
            json!({"ipAndDns": {"port": 3006}}),
        ]);
        assert!(ineligible_ports(&nodes).is_empty());
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let nodes = nodes(vec![
            json!({"eligible": false, "ipAndDns": {"port": 3010}}),
            json!({"eligible": false, "ipAndDns": {"port": 3006}}),
            json!({"eligible": false, "ipAndDns": {"port": 3010}}),
        ]);
        assert_eq!(ineligible_ports(&nodes), vec![3010, 3006, 3010]);
    }

    #[test]
    fn malformed_source_is_skipped() {
        let mut all = nodes(vec![json!({"eligible": false, "ipAndDns": {"port": 3006}})]);
        all.push(RawNode { source: None });
        all.push(RawNode {
            source: Some(json!("not an object")),
        });
        assert_eq!(ineligible_ports(&all), vec![3006]);
    }

    #[test]
    fn ineligible_without_port_is_skipped() {
        let nodes = nodes(vec![
            json!({"eligible": false}),
            json!({"eligible": false, "ipAndDns": {"port": 3007}}),
        ]);
        assert_eq!(ineligible_ports(&nodes), vec![3007]);
    }
}
