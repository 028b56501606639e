//! The staged export pipeline.
//!
//! Stages run strictly in sequence, each completing a full pass over the
//! machine collection before the next begins: normalize devices, resolve
//! interfaces, enrich network configuration. The fixed order keeps
//! assignment outcomes deterministic.

mod fields;
mod interfaces;
mod networks;
mod normalize;

pub use networks::in_range;

use tracing::info;

use crate::dcim::Dcim;
use crate::error::ExportError;
use crate::machine::Machine;

/// Fetch and reconcile the full machine collection.
///
/// # Errors
/// Fail-fast: the first normalization, enrichment, or fetch error aborts
/// the run.
pub async fn run<C: Dcim + ?Sized>(
    client: &C,
    filter_tag: Option<&str>,
) -> Result<Vec<Machine>, ExportError> {
    let devices = client
        .list_devices(filter_tag)
        .await
        .map_err(|e| ExportError::fetch("device listing", e))?;
    info!(devices = devices.len(), "fetched devices");

    let mut machines = devices
        .iter()
        .map(normalize::normalize_device)
        .collect::<Result<Vec<_>, _>>()?;

    interfaces::resolve_interfaces(client, &mut machines).await?;

    let ranges = client
        .list_ip_ranges()
        .await
        .map_err(|e| ExportError::fetch("IP range listing", e))?;
    info!(ranges = ranges.len(), "fetched IP ranges");

    networks::enrich_networks(&mut machines, &ranges)?;

    Ok(machines)
}
