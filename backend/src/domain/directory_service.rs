//! Pass-through service for the external directories.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{
    DirectoryGroup, DirectoryProperty, DirectoryQuery, DirectorySourceError, GroupDirectorySource,
    PropertyDirectorySource,
};

/// Directory lookups implementing [`DirectoryQuery`].
pub struct DirectoryService<P: ?Sized, G: ?Sized> {
    properties: Arc<P>,
    groups: Arc<G>,
}

impl<P: ?Sized, G: ?Sized> DirectoryService<P, G> {
    /// Create a service over the two directory sources.
    pub fn new(properties: Arc<P>, groups: Arc<G>) -> Self {
        Self { properties, groups }
    }
}

fn upstream_failure(operation: &'static str, summary: &str, err: &DirectorySourceError) -> Error {
    error!(operation, error = %err, "directory lookup failed");
    Error::upstream(summary).with_details(json!({
        "message": err.to_string(),
        "upstreamStatus": err.upstream_status(),
    }))
}

#[async_trait]
impl<P, G> DirectoryQuery for DirectoryService<P, G>
where
    P: PropertyDirectorySource + ?Sized,
    G: GroupDirectorySource + ?Sized,
{
    async fn list_properties(&self) -> Result<Vec<DirectoryProperty>, Error> {
        self.properties.fetch_properties().await.map_err(|err| {
            upstream_failure(
                "list_directory_properties",
                "Failed to fetch directory properties",
                &err,
            )
        })
    }

    async fn list_groups(&self) -> Result<Vec<DirectoryGroup>, Error> {
        self.groups.fetch_groups().await.map_err(|err| {
            upstream_failure(
                "list_directory_groups",
                "Failed to fetch directory groups",
                &err,
            )
        })
    }
}
