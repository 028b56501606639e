//! Interface resolution: MAC assignment per machine.

use tracing::{debug, warn};

use crate::dcim::{Dcim, Interface};
use crate::error::ExportError;
use crate::machine::Machine;

/// Tag marking the interface to use when a device has several.
const INTERFACE_TAG: &str = "eks-a";

/// Assign a MAC address to every machine, keyed by hostname.
pub(crate) async fn resolve_interfaces<C: Dcim + ?Sized>(
    client: &C,
    machines: &mut [Machine],
) -> Result<(), ExportError> {
    for machine in machines.iter_mut() {
        let interfaces = client
            .list_interfaces(&machine.hostname)
            .await
            .map_err(|e| ExportError::fetch(format!("interfaces for {}", machine.hostname), e))?;
        machine.mac_address = select_mac(&machine.hostname, &interfaces);
    }
    Ok(())
}

/// Pick the MAC to assign from the fetched interface set.
///
/// A single interface is taken unconditionally. With several, the first one
/// tagged for provisioning wins, so the outcome does not depend on how the
/// rest of the list is ordered. An empty set leaves the MAC empty.
fn select_mac(hostname: &str, interfaces: &[Interface]) -> String {
    match interfaces {
        [] => {
            warn!(hostname, "no interfaces returned, leaving MAC empty");
            String::new()
        }
        [only] => only.mac_address.clone().unwrap_or_default(),
        many => {
            for interface in many {
                if interface.tags.iter().any(|t| t.name == INTERFACE_TAG) {
                    return interface.mac_address.clone().unwrap_or_default();
                }
            }
            debug!(hostname, "no interface tagged {INTERFACE_TAG}, leaving MAC empty");
            String::new()
        }
    }
}
