//! Driving port for dashboard mutations.

use async_trait::async_trait;

use crate::domain::{DoorCode, DoorCodeId, Error, Group, GroupId, PropertyId, PropertyView};

/// Request to create a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPropertyRequest {
    pub name: String,
}

/// Request to attach a group to a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddGroupRequest {
    pub property_id: PropertyId,
    pub name: String,
    pub external_ref: Option<String>,
}

/// Full replacement of a group's template and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGroupRequest {
    pub group_id: GroupId,
    pub template: String,
    pub links: Vec<String>,
}

/// New description for a door code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDoorCodeRequest {
    pub door_code_id: DoorCodeId,
    pub description: String,
}

/// Write-side use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyCommand: Send + Sync {
    /// Create a property with its full block of door codes.
    async fn add_property(&self, request: AddPropertyRequest) -> Result<PropertyView, Error>;

    /// Delete a property together with its groups and door codes.
    async fn delete_property(&self, property_id: &PropertyId) -> Result<(), Error>;

    /// Attach a new group with empty template and links.
    async fn add_group(&self, request: AddGroupRequest) -> Result<Group, Error>;

    /// Replace a group's template and links.
    async fn update_group(&self, request: UpdateGroupRequest) -> Result<Group, Error>;

    /// Delete a group.
    async fn delete_group(&self, group_id: &GroupId) -> Result<(), Error>;

    /// Replace a door code's description and refresh its timestamp.
    async fn update_door_code(&self, request: UpdateDoorCodeRequest) -> Result<DoorCode, Error>;
}
