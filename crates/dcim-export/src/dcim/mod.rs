//! DCIM client abstractions.

pub mod netbox;
mod traits;

pub use traits::{Dcim, DcimError, Device, Interface, IpAssignment, IpRange, Tag};
