//! Ports for the external directories behind the selection pickers.
//!
//! Both directories are read-only pass-throughs: one lists candidate
//! properties from the listing service, the other candidate groups from the
//! messaging service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory adapters.
    pub enum DirectorySourceError {
        /// The directory has no endpoint or credentials configured.
        NotConfigured { directory: String } =>
            "{directory} directory is not configured",
        /// The request could not be sent or the response not read.
        Transport { message: String } =>
            "directory request failed: {message}",
        /// The directory answered with a non-success status.
        Status { status: u16, body: String } =>
            "directory responded with status {status}",
        /// The response body did not have the expected shape.
        Decode { message: String } =>
            "directory response could not be decoded: {message}",
    }
}

impl DirectorySourceError {
    /// Upstream HTTP status, when the directory answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Candidate property listed by the property directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryProperty {
    pub id: String,
    pub name: String,
}

/// Candidate messaging group listed by the group directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryGroup {
    pub id: String,
    pub subject: String,
}

/// Source of candidate properties.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyDirectorySource: Send + Sync {
    /// Fetch every property the directory knows about.
    async fn fetch_properties(&self) -> Result<Vec<DirectoryProperty>, DirectorySourceError>;
}

/// Source of candidate messaging groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupDirectorySource: Send + Sync {
    /// Fetch every group the directory knows about.
    async fn fetch_groups(&self) -> Result<Vec<DirectoryGroup>, DirectorySourceError>;
}

/// Stand-in wired when a directory has no configuration; every call fails
/// with [`DirectorySourceError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredDirectory;

#[async_trait]
impl PropertyDirectorySource for UnconfiguredDirectory {
    async fn fetch_properties(&self) -> Result<Vec<DirectoryProperty>, DirectorySourceError> {
        Err(DirectorySourceError::not_configured("property"))
    }
}

#[async_trait]
impl GroupDirectorySource for UnconfiguredDirectory {
    async fn fetch_groups(&self) -> Result<Vec<DirectoryGroup>, DirectorySourceError> {
        Err(DirectorySourceError::not_configured("group"))
    }
}
