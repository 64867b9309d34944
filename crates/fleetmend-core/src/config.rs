//! fleet.toml configuration parser.
//!
//! Every field carries a serde default, so a missing or partial file
//! degrades to the documented defaults instead of failing the run.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level fleet configuration, usually loaded from `fleet.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub authority: AuthorityConfig,
    pub ports: PortPlan,
    pub units: UnitsConfig,
}

/// The remote health authority the reconciler queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Base URL of the eligibility report service.
    pub base_url: String,
    /// Maximum records requested per report fetch.
    pub page_size: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://incentive-backend.example.net".to_string(),
            page_size: 100,
            timeout_secs: 30,
        }
    }
}

/// Names of the locally managed units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    /// Container name of the primary unit, restarted directly by name.
    pub primary_container: String,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            primary_container: "fleet-node".to_string(),
        }
    }
}

/// The port allocation scheme and its inversion, held in one value.
///
/// Provisioning gives auxiliary unit `i` (1-based) the listening port
/// `alloc_base + i * alloc_stride` and reserves the `alloc_stride - 1`
/// adjacent ports for sibling interfaces. The reconciler inverts a
/// reported port with `port - aux_offset`. Both halves must stay in
/// lockstep with whatever the provisioning collaborator deploys; this
/// struct is the single source of truth for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortPlan {
    /// Port reserved for the primary unit.
    pub primary_port: u16,
    /// Offset subtracted from a reported port to recover the unit index.
    pub aux_offset: u16,
    /// First port of the auxiliary allocation range.
    pub alloc_base: u32,
    /// Ports consumed per auxiliary unit (listen port plus siblings).
    pub alloc_stride: u32,
}

impl Default for PortPlan {
    fn default() -> Self {
        Self {
            primary_port: 9000,
            aux_offset: 3001,
            alloc_base: 30000,
            alloc_stride: 5,
        }
    }
}

impl PortPlan {
    /// Whether a reported port belongs to the primary unit.
    pub fn is_primary(&self, port: u16) -> bool {
        port == self.primary_port
    }

    /// Listening port allocated to auxiliary unit `index` (1-based).
    pub fn listen_port(&self, index: u32) -> u32 {
        self.alloc_base + index * self.alloc_stride
    }

    /// Recover the auxiliary unit index from a reported port.
    ///
    /// Negative means the port lies below the auxiliary range and the
    /// record must be rejected, not retried.
    pub fn aux_index(&self, port: u16) -> i64 {
        i64::from(port) - i64::from(self.aux_offset)
    }
}

impl FleetConfig {
    /// Load configuration from a `fleet.toml` file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FleetConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
