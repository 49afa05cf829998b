//! Write-side dashboard service.
//!
//! Validates incoming mutations, stamps door codes with the injected clock,
//! and normalises group links according to the configured [`LinkPolicy`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    AddGroupRequest, AddPropertyRequest, PropertyCommand, PropertyStore, PropertyStoreError,
    UpdateDoorCodeRequest, UpdateGroupRequest,
};
use crate::domain::store_error_mapping::StoreCall;
use crate::domain::{
    DoorCode, Error, Group, GroupContent, GroupId, GroupName, LinkPolicy, LinkValidationError,
    NewGroup, PropertyId, PropertyName, PropertyView, door_code_block, is_complete_block,
};

/// Property, group and door-code mutations implementing [`PropertyCommand`].
pub struct PropertyCommandService<S: ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    link_policy: LinkPolicy,
}

impl<S: ?Sized> PropertyCommandService<S> {
    /// Create a service writing to `store` with the default link policy.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            link_policy: LinkPolicy::default(),
        }
    }

    /// Override how group links are normalised on update.
    pub fn with_link_policy(mut self, link_policy: LinkPolicy) -> Self {
        self.link_policy = link_policy;
        self
    }
}

impl<S> PropertyCommandService<S>
where
    S: PropertyStore + ?Sized,
{
    /// Remove a property whose door-code block came back incomplete.
    async fn discard_incomplete(&self, property_id: &PropertyId, door_codes: usize) -> Error {
        error!(
            property_id = %property_id,
            door_codes,
            "store returned an incomplete door-code block"
        );
        let call =
            StoreCall::new("add_property", "Failed to add property").target(property_id.as_str());
        match self.store.delete_property(property_id).await {
            Ok(()) => Error::store("Failed to add property").with_details(json!({
                "code": "incomplete_door_codes",
                "doorCodes": door_codes,
            })),
            Err(delete_error) => call.fail(PropertyStoreError::orphaned_property(
                property_id.as_str(),
                format!("{door_codes} door codes returned; compensation: {delete_error}"),
            )),
        }
    }
}

fn missing_name(field: &str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn blank_link(err: &LinkValidationError) -> Error {
    let LinkValidationError::Blank { index } = err;
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "links",
        "index": index,
        "code": "blank_link",
    }))
}

fn normalise_external_ref(external_ref: Option<String>) -> Option<String> {
    external_ref
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl<S> PropertyCommand for PropertyCommandService<S>
where
    S: PropertyStore + ?Sized,
{
    async fn add_property(&self, request: AddPropertyRequest) -> Result<PropertyView, Error> {
        let name = PropertyName::new(request.name)
            .map_err(|_| missing_name("name", "Property name is required"))?;
        let drafts = door_code_block(self.clock.utc());

        let provisioned = self
            .store
            .provision_property(&name, &drafts)
            .await
            .map_err(|err| {
                StoreCall::new("add_property", "Failed to add property")
                    .target(name.as_ref())
                    .fail(err)
            })?;

        let mut door_codes = provisioned.door_codes;
        if !is_complete_block(&door_codes) {
            return Err(self
                .discard_incomplete(&provisioned.property.id, door_codes.len())
                .await);
        }
        door_codes.sort_by_key(|code| code.slot);

        info!(property_id = %provisioned.property.id, "property created");
        Ok(PropertyView::new(provisioned.property, Vec::new(), door_codes))
    }

    async fn delete_property(&self, property_id: &PropertyId) -> Result<(), Error> {
        self.store.delete_property(property_id).await.map_err(|err| {
            StoreCall::new("delete_property", "Failed to delete property")
                .target(property_id.as_str())
                .fail(err)
        })?;
        info!(property_id = %property_id, "property deleted");
        Ok(())
    }

    async fn add_group(&self, request: AddGroupRequest) -> Result<Group, Error> {
        let name = GroupName::new(request.name)
            .map_err(|_| missing_name("name", "Group name is required"))?;
        let group = NewGroup {
            name,
            external_ref: normalise_external_ref(request.external_ref),
        };

        let record = self
            .store
            .insert_group(&request.property_id, &group)
            .await
            .map_err(|err| {
                StoreCall::new("add_group", "Failed to add group")
                    .target(request.property_id.as_str())
                    .not_found("Property not found")
                    .fail(err)
            })?;
        info!(group_id = %record.id, property_id = %record.property_id, "group created");
        Ok(record.into_group())
    }

    async fn update_group(&self, request: UpdateGroupRequest) -> Result<Group, Error> {
        let links = self.link_policy.apply(request.links).map_err(|err| blank_link(&err))?;
        let content = GroupContent {
            template: request.template,
            links,
        };

        let record = self
            .store
            .update_group(&request.group_id, &content)
            .await
            .map_err(|err| {
                StoreCall::new("update_group", "Failed to update group")
                    .target(request.group_id.as_str())
                    .not_found("Group not found")
                    .fail(err)
            })?;
        Ok(record.into_group())
    }

    async fn delete_group(&self, group_id: &GroupId) -> Result<(), Error> {
        self.store.delete_group(group_id).await.map_err(|err| {
            StoreCall::new("delete_group", "Failed to delete group")
                .target(group_id.as_str())
                .fail(err)
        })
    }

    async fn update_door_code(&self, request: UpdateDoorCodeRequest) -> Result<DoorCode, Error> {
        self.store
            .update_door_code(&request.door_code_id, &request.description, self.clock.utc())
            .await
            .map_err(|err| {
                StoreCall::new("update_door_code", "Failed to update door code")
                    .target(request.door_code_id.as_str())
                    .not_found("Door code not found")
                    .fail(err)
            })
    }
}

#[cfg(test)]
#[path = "property_service_tests.rs"]
mod tests;
