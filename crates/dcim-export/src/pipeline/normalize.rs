//! Device normalization: raw DCIM device records into canonical machines.

use std::collections::BTreeMap;

use super::fields::{nested_address, parse_prefixed, plain_string};
use crate::dcim::Device;
use crate::error::ExportError;
use crate::machine::{Machine, CONTROL_PLANE, TYPE_LABEL, WORKER_PLANE};

/// Build one [`Machine`] from a raw device record.
///
/// Identity, BMC, disk, and label fields are populated here; MAC, gateway,
/// and nameservers stay empty for the later stages.
pub(crate) fn normalize_device(device: &Device) -> Result<Machine, ExportError> {
    let bmc = nested_address(&device.custom_fields, "bmc_ip")?;
    let bmc_username = plain_string(&device.custom_fields, "bmc_username")?;
    let bmc_password = plain_string(&device.custom_fields, "bmc_password")?;
    let disk = plain_string(&device.custom_fields, "disk")?;

    let primary = device
        .primary_ip4
        .as_ref()
        .ok_or_else(|| ExportError::TypeMismatch {
            field: "primary_ip4".to_string(),
            expected: "address assignment".to_string(),
            actual: "missing".to_string(),
        })?;
    let primary = parse_prefixed(&primary.address)?;

    let machine_type = if device.tags.iter().any(|t| t.name == CONTROL_PLANE) {
        CONTROL_PLANE
    } else {
        WORKER_PLANE
    };
    let labels = BTreeMap::from([(TYPE_LABEL.to_string(), machine_type.to_string())]);

    Ok(Machine {
        hostname: device.name.clone(),
        ip_address: primary.ip().to_string(),
        // The netmask comes from the BMC assignment's prefix, not the
        // primary address. Downstream tooling relies on this.
        netmask: bmc.mask().to_string(),
        gateway: String::new(),
        nameservers: Vec::new(),
        mac_address: String::new(),
        disk,
        labels,
        bmc_ip_address: bmc.ip().to_string(),
        bmc_username,
        bmc_password,
    })
}
