//! Property directory backed by the Hospitable listing API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use tracing::debug;

use super::dto::PropertyListDto;
use super::http::{build_client, endpoint, fetch_json};
use crate::domain::ports::{DirectoryProperty, DirectorySourceError, PropertyDirectorySource};

/// Where and how to reach the listing API.
#[derive(Debug, Clone)]
pub struct HospitableEndpoint {
    pub base_url: Url,
    /// Personal access token sent as a bearer credential.
    pub token: String,
}

/// `GET {base}/properties` with a bearer token, decoding `{ data: [...] }`.
pub struct HospitablePropertyDirectory {
    client: Client,
    endpoint: HospitableEndpoint,
}

impl HospitablePropertyDirectory {
    /// Build the adapter, bounding each request by `timeout` when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: HospitableEndpoint, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = build_client(timeout)?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PropertyDirectorySource for HospitablePropertyDirectory {
    async fn fetch_properties(&self) -> Result<Vec<DirectoryProperty>, DirectorySourceError> {
        let url = endpoint(&self.endpoint.base_url, &["properties"])?;
        debug!(%url, "fetching directory properties");
        let listing: PropertyListDto = fetch_json(
            self.client
                .get(url)
                .bearer_auth(&self.endpoint.token),
        )
        .await?;
        Ok(listing.into_domain())
    }
}
