//! Read-side dashboard service.
//!
//! Assembles the nested dashboard view from the store's flat rows. Every
//! collection is read in one batched call regardless of how many properties
//! exist, and any failed read fails the whole request: callers never see a
//! partially populated view.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{DashboardQuery, GroupTemplateRequest, PropertyGroups, PropertyStore};
use crate::domain::store_error_mapping::StoreCall;
use crate::domain::{
    DoorCode, Error, Group, GroupRecord, GroupTemplate, PropertyId, PropertyRecord, PropertyView,
};

const FETCH_FAILED: &str = "Failed to fetch data";

/// Dashboard read service implementing [`DashboardQuery`].
pub struct DashboardService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for DashboardService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> DashboardService<S> {
    /// Create a service reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// Nest groups and door codes under their owning properties.
///
/// Children whose `property_id` matches no property are dropped. Property
/// order is preserved, groups keep store order and door codes are ordered by
/// slot.
pub(crate) fn assemble(
    properties: Vec<PropertyRecord>,
    groups: Vec<GroupRecord>,
    door_codes: Vec<DoorCode>,
) -> Vec<PropertyView> {
    let mut groups_by_property: HashMap<PropertyId, Vec<Group>> = HashMap::new();
    for record in groups {
        groups_by_property
            .entry(record.property_id.clone())
            .or_default()
            .push(record.into_group());
    }

    let mut codes_by_property: HashMap<PropertyId, Vec<DoorCode>> = HashMap::new();
    for code in door_codes {
        codes_by_property
            .entry(code.property_id.clone())
            .or_default()
            .push(code);
    }

    properties
        .into_iter()
        .map(|property| {
            let groups = groups_by_property.remove(&property.id).unwrap_or_default();
            let mut codes = codes_by_property.remove(&property.id).unwrap_or_default();
            codes.sort_by_key(|code| code.slot);
            PropertyView::new(property, groups, codes)
        })
        .collect()
}

impl<S> DashboardService<S>
where
    S: PropertyStore + ?Sized,
{
    async fn resolve_property(
        &self,
        operation: &'static str,
        name: &str,
    ) -> Result<PropertyRecord, Error> {
        self.store.find_property_by_name(name).await.map_err(|err| {
            StoreCall::new(operation, FETCH_FAILED)
                .target(name)
                .not_found("Property not found")
                .fail(err)
        })
    }

    async fn property_name_of(&self, property_id: &PropertyId) -> Result<String, Error> {
        let properties = self.store.list_properties().await.map_err(|err| {
            StoreCall::new("group_template", FETCH_FAILED)
                .target(property_id.as_str())
                .fail(err)
        })?;
        properties
            .into_iter()
            .find(|property| &property.id == property_id)
            .map(|property| property.name)
            .ok_or_else(|| Error::not_found("Property not found"))
    }
}

#[async_trait]
impl<S> DashboardQuery for DashboardService<S>
where
    S: PropertyStore + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<PropertyView>, Error> {
        let properties = self
            .store
            .list_properties()
            .await
            .map_err(|err| StoreCall::new("get_all", FETCH_FAILED).fail(err))?;
        if properties.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<PropertyId> = properties.iter().map(|p| p.id.clone()).collect();
        let (groups, door_codes) = try_join(
            async {
                self.store
                    .list_groups(&ids)
                    .await
                    .map_err(|err| StoreCall::new("get_all.groups", FETCH_FAILED).fail(err))
            },
            async {
                self.store
                    .list_door_codes(&ids)
                    .await
                    .map_err(|err| StoreCall::new("get_all.door_codes", FETCH_FAILED).fail(err))
            },
        )
        .await?;

        debug!(
            properties = properties.len(),
            groups = groups.len(),
            door_codes = door_codes.len(),
            "assembled dashboard"
        );
        Ok(assemble(properties, groups, door_codes))
    }

    async fn groups_for_property(&self, property_name: &str) -> Result<PropertyGroups, Error> {
        let property = self
            .resolve_property("groups_for_property", property_name)
            .await?;
        let groups = self
            .store
            .list_groups(std::slice::from_ref(&property.id))
            .await
            .map_err(|err| {
                StoreCall::new("groups_for_property", FETCH_FAILED)
                    .target(property.id.as_str())
                    .fail(err)
            })?;
        Ok(PropertyGroups {
            property_id: property.id,
            property_name: property.name,
            groups: groups.into_iter().map(GroupRecord::into_group).collect(),
        })
    }

    async fn group_template(&self, request: GroupTemplateRequest) -> Result<GroupTemplate, Error> {
        let candidates = self
            .store
            .list_groups_by_name(&request.group_name)
            .await
            .map_err(|err| {
                StoreCall::new("group_template", FETCH_FAILED)
                    .target(&request.group_name)
                    .fail(err)
            })?;

        let (group, property_name) = match request.property_name.as_deref() {
            Some(property_name) => {
                let property = self.resolve_property("group_template", property_name).await?;
                let group = candidates
                    .into_iter()
                    .find(|group| group.property_id == property.id)
                    .ok_or_else(|| Error::not_found("Group not found in this property"))?;
                (group, property.name)
            }
            None => {
                let mut candidates = candidates.into_iter();
                let group = candidates
                    .next()
                    .ok_or_else(|| Error::not_found("Group not found"))?;
                let others = candidates.count();
                if others > 0 {
                    return Err(Error::invalid_request(
                        "Group name is ambiguous; specify a property",
                    )
                    .with_details(json!({
                        "field": "property",
                        "code": "ambiguous_group_name",
                        "matches": others + 1,
                    })));
                }
                let property_name = self.property_name_of(&group.property_id).await?;
                (group, property_name)
            }
        };

        Ok(GroupTemplate {
            group_id: group.id,
            group_name: group.name,
            property_id: group.property_id,
            property_name,
            template: group.template,
        })
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
