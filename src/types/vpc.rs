//! VPC resource and its request payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A virtual private cloud.
///
/// `id` is assigned by the API and is `0` only on values that were never
/// created. Both timestamps are populated by the API on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vpc {
    /// The VPC ID.
    #[serde(default)]
    pub id: u64,
    /// Unique label.
    pub label: String,
    /// Free-form description; empty when unset.
    #[serde(default)]
    pub description: String,
    /// Region the VPC lives in.
    pub region: String,
    /// Subnets in the order the API reports them.
    #[serde(default)]
    pub subnets: Vec<VpcSubnet>,
    /// When the VPC was created.
    #[serde(default, with = "crate::types::time")]
    pub created: Option<NaiveDateTime>,
    /// When the VPC was last updated.
    #[serde(default, with = "crate::types::time")]
    pub updated: Option<NaiveDateTime>,
}

/// A subnet nested inside a [`Vpc`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcSubnet {
    /// The subnet ID.
    #[serde(default)]
    pub id: u64,
    /// Subnet label, unique within its VPC.
    pub label: String,
    /// IPv4 range in CIDR notation.
    pub ipv4: String,
    /// When the subnet was created.
    #[serde(default, with = "crate::types::time")]
    pub created: Option<NaiveDateTime>,
    /// When the subnet was last updated.
    #[serde(default, with = "crate::types::time")]
    pub updated: Option<NaiveDateTime>,
}

/// Payload for creating a VPC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcCreateOptions {
    /// Unique label.
    pub label: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Region with VPC support.
    pub region: String,
    /// Subnets to create alongside the VPC.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<VpcSubnetCreateOptions>,
}

impl VpcCreateOptions {
    /// Creates options with the given label and region.
    pub fn new(label: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            region: region.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a subnet.
    #[must_use]
    pub fn with_subnet(mut self, label: impl Into<String>, ipv4: impl Into<String>) -> Self {
        self.subnets.push(VpcSubnetCreateOptions::new(label, ipv4));
        self
    }
}

/// Subnet specification inside [`VpcCreateOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcSubnetCreateOptions {
    /// Subnet label.
    pub label: String,
    /// IPv4 range in CIDR notation.
    pub ipv4: String,
}

impl VpcSubnetCreateOptions {
    /// Creates a subnet specification.
    pub fn new(label: impl Into<String>, ipv4: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ipv4: ipv4.into(),
        }
    }
}

/// Payload for updating the mutable fields of a VPC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcUpdateOptions {
    /// New label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// New description.
    #[serde(default)]
    pub description: String,
}

impl VpcUpdateOptions {
    /// Creates empty update options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Vpc {
    /// Projects this VPC onto the options that would create it.
    pub fn get_create_options(&self) -> VpcCreateOptions {
        VpcCreateOptions {
            label: self.label.clone(),
            description: self.description.clone(),
            region: self.region.clone(),
            subnets: self
                .subnets
                .iter()
                .map(|s| VpcSubnetCreateOptions::new(s.label.clone(), s.ipv4.clone()))
                .collect(),
        }
    }

    /// Projects this VPC onto its mutable fields.
    pub fn get_update_options(&self) -> VpcUpdateOptions {
        VpcUpdateOptions {
            label: self.label.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vpc_json() -> serde_json::Value {
        serde_json::json!({
            "id": 1234,
            "label": "test-vpc",
            "description": "",
            "region": "us-east",
            "subnets": [
                {
                    "id": 55,
                    "label": "a",
                    "ipv4": "10.0.0.0/24",
                    "linodes": [],
                    "created": "2023-08-28T18:13:43",
                    "updated": "2023-08-28T18:13:43"
                }
            ],
            "created": "2023-08-28T18:13:43",
            "updated": "2023-08-28T18:13:43"
        })
    }

    #[test]
    fn test_vpc_deserialize() {
        let vpc: Vpc = serde_json::from_value(vpc_json()).unwrap();
        assert_eq!(vpc.id, 1234);
        assert_eq!(vpc.subnets.len(), 1);
        assert_eq!(vpc.subnets[0].ipv4, "10.0.0.0/24");
        assert!(vpc.created.is_some());
        assert!(vpc.updated.is_some());
    }

    #[test]
    fn test_vpc_missing_timestamps_are_unset() {
        let vpc: Vpc = serde_json::from_value(serde_json::json!({
            "label": "x",
            "region": "us-east",
            "created": ""
        }))
        .unwrap();
        assert_eq!(vpc.id, 0);
        assert!(vpc.created.is_none());
        assert!(vpc.updated.is_none());
    }

    #[test]
    fn test_create_options_skip_empty_fields() {
        let opts = VpcCreateOptions::new("my-vpc", "us-east");
        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(value, serde_json::json!({ "label": "my-vpc", "region": "us-east" }));

        let opts = opts.with_subnet("a", "10.0.0.0/24");
        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(value["subnets"][0]["ipv4"], "10.0.0.0/24");
    }

    #[test]
    fn test_get_create_options_keeps_subnet_order() {
        let vpc: Vpc = serde_json::from_value(serde_json::json!({
            "id": 1,
            "label": "ordered",
            "region": "us-east",
            "subnets": [
                { "label": "b", "ipv4": "10.0.1.0/24" },
                { "label": "a", "ipv4": "10.0.0.0/24" }
            ]
        }))
        .unwrap();

        let opts = vpc.get_create_options();
        assert_eq!(opts.label, "ordered");
        assert_eq!(opts.subnets[0].label, "b");
        assert_eq!(opts.subnets[1].label, "a");
    }

    #[test]
    fn test_get_update_options() {
        let vpc: Vpc = serde_json::from_value(vpc_json()).unwrap();
        let opts = vpc.get_update_options();
        assert_eq!(opts, VpcUpdateOptions::new().with_label("test-vpc"));
    }
}
