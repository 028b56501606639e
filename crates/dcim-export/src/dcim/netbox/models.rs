//! NetBox REST API wire models.

use serde::Deserialize;

/// Paged list response returned by every NetBox list endpoint.
#[derive(Debug, Deserialize)]
pub struct Paged<T> {
    /// Total number of results across all pages.
    pub count: u64,
    /// Absolute URL of the next page, if any.
    pub next: Option<String>,
    /// Results on this page.
    pub results: Vec<T>,
}
