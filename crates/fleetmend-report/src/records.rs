//! Report wire schema and per-record field extraction.

use serde::Deserialize;
use serde_json::Value;

/// Top-level report payload: `{"nodes": [...]}`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportPage {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

/// One report entry as delivered by the authority.
///
/// `_source` is opaque pass-through data. It may be absent or carry any
/// JSON shape; only [`RawNode::record`] decides what is usable.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

/// The typed fields the reconciler reads out of one report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointRecord {
    /// The authority's health judgment. `None` when unstated; absence
    /// must never be read as ineligible.
    pub eligible: Option<bool>,
    /// The endpoint's bound port, from the nested `ipAndDns.port` field.
    pub port: Option<u16>,
}

impl RawNode {
    /// Extract the typed record, or `None` when `_source` is absent or
    /// not a JSON object.
    pub fn record(&self) -> Option<EndpointRecord> {
        let source = self.source.as_ref()?.as_object()?;

        let eligible = source.get("eligible").and_then(Value::as_bool);
        let port = source
            .get("ipAndDns")
            .and_then(|v| v.get("port"))
            .and_then(Value::as_u64)
            .and_then(|p| u16::try_from(p).ok());

        Some(EndpointRecord { eligible, port })
    }
}
