//! NetBox REST API client.
//!
//! Token-authenticated, read-only. List endpoints are paged; the client
//! follows `next` links so callers always see complete collections.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::models::Paged;
use crate::dcim::{Dcim, DcimError, Device, Interface, IpRange};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// NetBox API client.
#[derive(Clone, Debug)]
pub struct Netbox {
    /// HTTP client.
    client: Client,
    /// Base URL of the NetBox instance.
    base_url: Url,
    /// API token.
    token: String,
}

impl Netbox {
    /// Create a new NetBox client.
    ///
    /// # Errors
    /// Returns an error if `host` is not a valid URL or the HTTP client
    /// cannot be created.
    pub fn new(host: &str, token: impl Into<String>) -> Result<Self, DcimError> {
        let base_url = Url::parse(host)
            .map_err(|e| DcimError::Config(format!("invalid NetBox host {host:?}: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    /// Fetch every page of a list endpoint, following `next` links.
    async fn get_all<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, DcimError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| DcimError::Config(format!("invalid path {path:?}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut results = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next {
            debug!(url = %url, "GET request");

            let response = self
                .client
                .get(url)
                .header("Authorization", format!("Token {}", self.token))
                .header("Accept", "application/json")
                .send()
                .await?;

            let page: Paged<T> = Self::handle_response(response).await?;
            debug!(total = page.count, fetched = page.results.len(), "page received");
            results.extend(page.results);

            next = match page.next {
                Some(link) => Some(Url::parse(&link).map_err(|e| {
                    DcimError::Config(format!("invalid next link {link:?}: {e}"))
                })?),
                None => None,
            };
        }

        Ok(results)
    }

    /// Handle an API response, parsing JSON or surfacing the error body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DcimError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "failed to parse NetBox response");
                DcimError::Serialization(e)
            })
        } else {
            Err(DcimError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl Dcim for Netbox {
    async fn list_devices(&self, filter_tag: Option<&str>) -> Result<Vec<Device>, DcimError> {
        match filter_tag {
            Some(tag) => self.get_all("api/dcim/devices/", &[("tag", tag)]).await,
            None => self.get_all("api/dcim/devices/", &[]).await,
        }
    }

    async fn list_interfaces(&self, device: &str) -> Result<Vec<Interface>, DcimError> {
        self.get_all("api/dcim/interfaces/", &[("device", device)])
            .await
    }

    async fn list_ip_ranges(&self) -> Result<Vec<IpRange>, DcimError> {
        self.get_all("api/ipam/ip-ranges/", &[]).await
    }
}
