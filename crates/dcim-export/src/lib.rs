//! DCIM machine-inventory export.
//!
//! Fetches device, interface, and IP-range inventory from a DCIM system
//! (NetBox), reconciles it into one canonical [`Machine`] per physical
//! host, and emits the collection as indented JSON and as the CSV layout
//! consumed by cluster-provisioning tooling.
//!
//! # Example
//!
//! ```rust,ignore
//! use dcim_export::{output, pipeline, Netbox};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let netbox = Netbox::new("https://netbox.example.com", "token")?;
//!     let machines = pipeline::run(&netbox, Some("eks-a")).await?;
//!     output::write_csv_file(&machines, "hardware.csv".as_ref())?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dcim;
mod error;
pub mod machine;
pub mod output;
pub mod pipeline;

pub use dcim::netbox::Netbox;
pub use dcim::{Dcim, DcimError, Device, Interface, IpAssignment, IpRange, Tag};
pub use error::ExportError;
pub use machine::{deserialize_machines, serialize_machines, Machine};
pub use pipeline::in_range;
