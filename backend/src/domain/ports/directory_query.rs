//! Driving port for the selection-picker directories.

use async_trait::async_trait;

use super::{DirectoryGroup, DirectoryProperty};
use crate::domain::Error;

/// Read-only directory lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Candidate properties from the listing service.
    async fn list_properties(&self) -> Result<Vec<DirectoryProperty>, Error>;

    /// Candidate groups from the messaging service.
    async fn list_groups(&self) -> Result<Vec<DirectoryGroup>, Error>;
}
