//! Canonical machine schema and its intermediate encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Label value for machines tagged as control plane.
pub const CONTROL_PLANE: &str = "control-plane";
/// Label value for every other machine.
pub const WORKER_PLANE: &str = "worker-plane";
/// The single label key a machine ever carries.
pub const TYPE_LABEL: &str = "type";

/// One physical machine, reconciled from device, interface, and IP-range
/// inventory.
///
/// Created by the normalizer with identity, BMC, disk, and label fields;
/// the interface and network stages fill in MAC, gateway, and nameservers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(rename = "Hostname")]
    pub hostname: String,
    /// Primary address, prefix discarded at parse time.
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    /// Dotted-quad mask taken from the BMC assignment's prefix.
    #[serde(rename = "Netmask")]
    pub netmask: String,
    /// Empty until network enrichment matches a range.
    #[serde(rename = "Gateway")]
    pub gateway: String,
    /// Ordered; empty until network enrichment matches a range.
    #[serde(rename = "Nameservers")]
    pub nameservers: Vec<String>,
    /// Empty if interface resolution found nothing.
    #[serde(rename = "MACAddress")]
    pub mac_address: String,
    #[serde(rename = "Disk")]
    pub disk: String,
    /// Exactly one entry: `"type"` mapped to [`CONTROL_PLANE`] or
    /// [`WORKER_PLANE`].
    #[serde(rename = "Labels")]
    pub labels: BTreeMap<String, String>,
    #[serde(rename = "BMCIPAddress")]
    pub bmc_ip_address: String,
    #[serde(rename = "BMCUsername")]
    pub bmc_username: String,
    #[serde(rename = "BMCPassword")]
    pub bmc_password: String,
}

impl Machine {
    /// The machine's `"type"` label value.
    #[must_use]
    pub fn type_label(&self) -> &str {
        self.labels.get(TYPE_LABEL).map_or("", String::as_str)
    }
}

/// Encode the collection as indented JSON, preserving field names and
/// collection order.
///
/// # Errors
/// Returns an error if the collection cannot be encoded.
pub fn serialize_machines(machines: &[Machine]) -> Result<Vec<u8>, ExportError> {
    serde_json::to_vec_pretty(machines).map_err(ExportError::Encode)
}

/// Decode a collection previously produced by [`serialize_machines`].
///
/// # Errors
/// Returns [`ExportError::Decode`] if the input is not a well-formed
/// machine collection.
pub fn deserialize_machines(bytes: &[u8]) -> Result<Vec<Machine>, ExportError> {
    serde_json::from_slice(bytes).map_err(ExportError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Machine {
        Machine {
            hostname: "rack1-node3".to_string(),
            ip_address: "10.80.21.32".to_string(),
            netmask: "255.255.248.0".to_string(),
            gateway: "10.80.16.1".to_string(),
            nameservers: vec!["121.63.58.96".to_string(), "121.63.68.96".to_string()],
            mac_address: "AA:BB:CC:DD:EE:FF".to_string(),
            disk: "/dev/sda".to_string(),
            labels: BTreeMap::from([(TYPE_LABEL.to_string(), CONTROL_PLANE.to_string())]),
            bmc_ip_address: "10.80.12.20".to_string(),
            bmc_username: "root".to_string(),
            bmc_password: "calvin".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let machines = vec![
            sample(),
            Machine {
                hostname: "rack1-node4".to_string(),
                gateway: String::new(),
                nameservers: Vec::new(),
                mac_address: String::new(),
                labels: BTreeMap::from([(TYPE_LABEL.to_string(), WORKER_PLANE.to_string())]),
                ..sample()
            },
        ];

        let encoded = serialize_machines(&machines).unwrap();
        let decoded = deserialize_machines(&encoded).unwrap();
        assert_eq!(decoded, machines);
    }

    #[test]
    fn test_encoding_preserves_field_names() {
        let encoded = serialize_machines(&[sample()]).unwrap();
        let text = String::from_utf8(encoded).unwrap();
        for field in [
            "\"Hostname\"",
            "\"IPAddress\"",
            "\"Netmask\"",
            "\"Gateway\"",
            "\"Nameservers\"",
            "\"MACAddress\"",
            "\"Disk\"",
            "\"Labels\"",
            "\"BMCIPAddress\"",
            "\"BMCUsername\"",
            "\"BMCPassword\"",
        ] {
            assert!(text.contains(field), "missing {field} in {text}");
        }
    }

    #[test]
    fn test_decode_failure() {
        let err = deserialize_machines(b"{ not json").unwrap_err();
        assert!(matches!(err, ExportError::Decode(_)));
    }
}
