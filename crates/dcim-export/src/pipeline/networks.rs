//! Network enrichment: gateway and nameservers via IP-range membership.

use std::net::Ipv4Addr;

use tracing::debug;

use super::fields::{address_list, nested_address, parse_prefixed};
use crate::dcim::IpRange;
use crate::error::ExportError;
use crate::machine::Machine;

/// Inclusive membership test against fixed range endpoints.
///
/// The bounds are address+prefix literals; only their address portion is
/// used, the prefix never widens the range. A candidate that is not a
/// well-formed IPv4 address is reported as out of range, not as an error.
///
/// # Errors
/// Returns [`ExportError::AddressParse`] if either bound is malformed.
pub fn in_range(candidate: &str, start_bound: &str, end_bound: &str) -> Result<bool, ExportError> {
    let start = u32::from(parse_prefixed(start_bound)?.ip());
    let end = u32::from(parse_prefixed(end_bound)?.ip());
    let Ok(candidate) = candidate.parse::<Ipv4Addr>() else {
        return Ok(false);
    };
    let candidate = u32::from(candidate);
    Ok(start <= candidate && candidate <= end)
}

/// Assign gateway and nameservers to every machine whose primary address
/// falls inside a fetched range.
///
/// Ranges are assumed non-overlapping upstream; the first match is taken
/// and scanning stops, so a violation cannot silently flip an assignment.
pub(crate) fn enrich_networks(
    machines: &mut [Machine],
    ranges: &[IpRange],
) -> Result<(), ExportError> {
    for machine in machines.iter_mut() {
        for range in ranges {
            if !in_range(&machine.ip_address, &range.start_address, &range.end_address)? {
                continue;
            }

            let gateway = nested_address(&range.custom_fields, "gateway")?;
            let nameservers = address_list(&range.custom_fields, "nameservers")?;

            machine.gateway = gateway.ip().to_string();
            machine.nameservers = nameservers.iter().map(|n| n.ip().to_string()).collect();
            debug!(
                hostname = %machine.hostname,
                gateway = %machine.gateway,
                "assigned network configuration"
            );
            break;
        }
    }
    Ok(())
}
