//! Driving port for dashboard reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Group, GroupTemplate, PropertyId, PropertyView};

/// Groups of a property resolved by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroups {
    pub property_id: PropertyId,
    pub property_name: String,
    pub groups: Vec<Group>,
}

/// Request for a group template by group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTemplateRequest {
    pub group_name: String,
    /// Restrict the lookup to one property (matched case-insensitively).
    pub property_name: Option<String>,
}

/// Read-side use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Every property with its groups and door codes nested.
    async fn get_all(&self) -> Result<Vec<PropertyView>, Error>;

    /// Groups of the property named `property_name`.
    async fn groups_for_property(&self, property_name: &str) -> Result<PropertyGroups, Error>;

    /// The template of a group resolved by name.
    async fn group_template(&self, request: GroupTemplateRequest) -> Result<GroupTemplate, Error>;
}
