//! Group directory backed by the Evolution messaging API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use tracing::debug;

use super::dto::GroupDto;
use super::http::{build_client, endpoint, fetch_json};
use crate::domain::ports::{DirectoryGroup, DirectorySourceError, GroupDirectorySource};

/// Where and how to reach the messaging API.
#[derive(Debug, Clone)]
pub struct EvolutionEndpoint {
    pub base_url: Url,
    /// Sent in the `apikey` header.
    pub api_key: String,
    /// Messaging instance whose groups are listed.
    pub instance: String,
}

/// `GET {base}/group/fetchAllGroups/{instance}?getParticipants=false`.
pub struct EvolutionGroupDirectory {
    client: Client,
    endpoint: EvolutionEndpoint,
}

impl EvolutionGroupDirectory {
    /// Build the adapter, bounding each request by `timeout` when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: EvolutionEndpoint, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = build_client(timeout)?;
        Ok(Self { client, endpoint })
    }

    fn groups_url(&self) -> Result<Url, DirectorySourceError> {
        let mut url = endpoint(
            &self.endpoint.base_url,
            &["group", "fetchAllGroups", &self.endpoint.instance],
        )?;
        url.query_pairs_mut().append_pair("getParticipants", "false");
        Ok(url)
    }
}

#[async_trait]
impl GroupDirectorySource for EvolutionGroupDirectory {
    async fn fetch_groups(&self) -> Result<Vec<DirectoryGroup>, DirectorySourceError> {
        let url = self.groups_url()?;
        debug!(%url, "fetching directory groups");
        let groups: Vec<GroupDto> = fetch_json(
            self.client
                .get(url)
                .header("apikey", &self.endpoint.api_key),
        )
        .await?;
        Ok(groups.into_iter().map(GroupDto::into_domain).collect())
    }
}
