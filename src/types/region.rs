//! Region metadata.

use serde::{Deserialize, Serialize};

/// A region and the capabilities it supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Region ID (e.g., "us-east").
    pub id: String,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    /// Country code.
    #[serde(default)]
    pub country: String,
    /// Capability tags (e.g., "Linodes", "VPCs").
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Region status; `"ok"` when the region accepts new resources.
    #[serde(default)]
    pub status: String,
}

impl Region {
    /// Returns `true` if the region is accepting new resources.
    pub fn is_available(&self) -> bool {
        self.status == "ok"
    }

    /// Returns `true` if every tag in `capabilities` is supported.
    pub fn has_capabilities(&self, capabilities: &[&str]) -> bool {
        capabilities
            .iter()
            .all(|cap| self.capabilities.iter().any(|c| c == cap))
    }
}
