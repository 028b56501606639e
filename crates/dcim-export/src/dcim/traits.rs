//! The client trait and the resource records it returns.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while talking to the DCIM system.
#[derive(Error, Debug)]
pub enum DcimError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A response body could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A tag attached to a device or interface.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// An address assignment, as an address+prefix literal.
#[derive(Debug, Clone, Deserialize)]
pub struct IpAssignment {
    pub address: String,
}

/// A device record as returned by the DCIM system.
///
/// Custom fields stay untyped here; the normalizer validates their shape
/// exactly once at the ingestion boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(default)]
    pub primary_ip4: Option<IpAssignment>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A network interface attached to a device.
#[derive(Debug, Clone, Deserialize)]
pub struct Interface {
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// An IP range with its network configuration in custom fields.
#[derive(Debug, Clone, Deserialize)]
pub struct IpRange {
    pub start_address: String,
    pub end_address: String,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

/// Read access to DCIM inventory.
///
/// Transport, authentication, and pagination belong to the implementation;
/// callers always see complete collections.
#[async_trait]
pub trait Dcim: Send + Sync {
    /// List devices, optionally restricted to those carrying `filter_tag`.
    async fn list_devices(&self, filter_tag: Option<&str>) -> Result<Vec<Device>, DcimError>;

    /// List the interfaces attached to the named device.
    async fn list_interfaces(&self, device: &str) -> Result<Vec<Interface>, DcimError>;

    /// List all IP ranges.
    async fn list_ip_ranges(&self) -> Result<Vec<IpRange>, DcimError>;
}
