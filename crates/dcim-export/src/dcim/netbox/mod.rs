//! NetBox DCIM backend.
//!
//! Implements the [`Dcim`](crate::dcim::Dcim) trait over the NetBox REST API.

mod client;
mod models;

pub use client::Netbox;
