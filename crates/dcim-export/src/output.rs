//! CSV projection of the machine collection.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::machine::{Machine, TYPE_LABEL};

/// Column order expected by the downstream provisioning tooling.
const HEADER: [&str; 11] = [
    "hostname",
    "bmc_ip",
    "bmc_username",
    "bmc_password",
    "mac",
    "ip_address",
    "netmask",
    "gateway",
    "nameservers",
    "labels",
    "disk",
];

/// Write the collection as CSV, one row per machine in collection order.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_csv<W: Write>(machines: &[Machine], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for machine in machines {
        let nameservers = machine.nameservers.join("|");
        let labels = format!("{TYPE_LABEL}={}", machine.type_label());
        writer.write_record([
            machine.hostname.as_str(),
            machine.bmc_ip_address.as_str(),
            machine.bmc_username.as_str(),
            machine.bmc_password.as_str(),
            machine.mac_address.as_str(),
            machine.ip_address.as_str(),
            machine.netmask.as_str(),
            machine.gateway.as_str(),
            nameservers.as_str(),
            labels.as_str(),
            machine.disk.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the collection as a CSV file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_csv_file(machines: &[Machine], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(machines, file)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::machine::{CONTROL_PLANE, WORKER_PLANE};

    use super::*;

    fn machine(hostname: &str, nameservers: &[&str], machine_type: &str) -> Machine {
        Machine {
            hostname: hostname.to_string(),
            ip_address: "10.80.21.32".to_string(),
            netmask: "255.255.255.0".to_string(),
            gateway: "10.80.21.1".to_string(),
            nameservers: nameservers.iter().map(ToString::to_string).collect(),
            mac_address: "AA:BB:CC:DD:EE:FF".to_string(),
            disk: "/dev/sda".to_string(),
            labels: BTreeMap::from([(TYPE_LABEL.to_string(), machine_type.to_string())]),
            bmc_ip_address: "10.80.12.20".to_string(),
            bmc_username: "root".to_string(),
            bmc_password: "calvin".to_string(),
        }
    }

    fn render(machines: &[Machine]) -> String {
        let mut buffer = Vec::new();
        write_csv(machines, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_exactness() {
        let text = render(&[]);
        assert_eq!(
            text.lines().next().unwrap(),
            "hostname,bmc_ip,bmc_username,bmc_password,mac,ip_address,netmask,gateway,nameservers,labels,disk"
        );
    }

    #[test]
    fn test_row_contents() {
        let text = render(&[machine("rack1-node3", &["1.1.1.1"], CONTROL_PLANE)]);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "rack1-node3,10.80.12.20,root,calvin,AA:BB:CC:DD:EE:FF,10.80.21.32,255.255.255.0,10.80.21.1,1.1.1.1,type=control-plane,/dev/sda"
        );
    }

    #[test]
    fn test_nameserver_join() {
        let text = render(&[
            machine("a", &["1.1.1.1"], WORKER_PLANE),
            machine("b", &["", "121.63.58.96", "121.63.68.96"], WORKER_PLANE),
        ]);
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert!(rows[0].contains(",1.1.1.1,type="));
        assert!(rows[1].contains(",|121.63.58.96|121.63.68.96,type="));
    }

    #[test]
    fn test_row_order_mirrors_collection() {
        let text = render(&[
            machine("second", &[], WORKER_PLANE),
            machine("first", &[], WORKER_PLANE),
        ]);
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert!(rows[0].starts_with("second,"));
        assert!(rows[1].starts_with("first,"));
    }
}
