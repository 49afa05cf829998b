//! Fallback `PropertyStore` held entirely in process memory.
//!
//! Used only when the database is unreachable at startup in development.
//! Data does not survive a restart. Three ordered collections share one
//! monotonic counter for synthetic identifiers: `mem-<n>` for properties,
//! `mem-group-<n>` for groups and `mem-code-<n>` for door codes. Scans are
//! linear.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{PropertyStore, PropertyStoreError};
use crate::domain::{
    DoorCode, DoorCodeId, GroupContent, GroupId, GroupRecord, NewDoorCode, NewGroup, PropertyId,
    PropertyName, PropertyRecord,
};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    properties: Vec<PropertyRecord>,
    groups: Vec<GroupRecord>,
    door_codes: Vec<DoorCode>,
}

impl MemoryState {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn has_property(&self, id: &PropertyId) -> bool {
        self.properties.iter().any(|property| &property.id == id)
    }
}

fn matches_name(stored: &str, wanted: &str) -> bool {
    stored.trim().to_lowercase() == wanted.trim().to_lowercase()
}

/// Development-only [`PropertyStore`] backed by mutex-guarded vectors.
///
/// The lock is never held across an await point. Property creation uses the
/// trait's compensating two-step provisioning.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    state: Mutex<MemoryState>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, PropertyStoreError> {
        self.state
            .lock()
            .map_err(|_| PropertyStoreError::query("fallback store lock poisoned"))
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn probe(&self) -> Result<(), PropertyStoreError> {
        self.lock().map(|_| ())
    }

    async fn list_properties(&self) -> Result<Vec<PropertyRecord>, PropertyStoreError> {
        Ok(self.lock()?.properties.clone())
    }

    async fn find_property_by_name(
        &self,
        name: &str,
    ) -> Result<PropertyRecord, PropertyStoreError> {
        let state = self.lock()?;
        let mut matches = state
            .properties
            .iter()
            .filter(|property| matches_name(&property.name, name));
        match (matches.next(), matches.next()) {
            (Some(property), None) => Ok(property.clone()),
            (Some(_), Some(_)) => Err(PropertyStoreError::query(format!(
                "more than one property is named {name:?}"
            ))),
            (None, _) => Err(PropertyStoreError::not_found("property", name)),
        }
    }

    async fn list_groups(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<GroupRecord>, PropertyStoreError> {
        let state = self.lock()?;
        Ok(state
            .groups
            .iter()
            .filter(|group| property_ids.contains(&group.property_id))
            .cloned()
            .collect())
    }

    async fn list_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<GroupRecord>, PropertyStoreError> {
        let state = self.lock()?;
        Ok(state
            .groups
            .iter()
            .filter(|group| matches_name(&group.name, name))
            .cloned()
            .collect())
    }

    async fn list_door_codes(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<DoorCode>, PropertyStoreError> {
        let state = self.lock()?;
        Ok(state
            .door_codes
            .iter()
            .filter(|code| property_ids.contains(&code.property_id))
            .cloned()
            .collect())
    }

    async fn insert_property(
        &self,
        name: &PropertyName,
    ) -> Result<PropertyRecord, PropertyStoreError> {
        let mut state = self.lock()?;
        let record = PropertyRecord {
            id: PropertyId::new(state.next("mem-")),
            name: name.to_string(),
        };
        state.properties.push(record.clone());
        Ok(record)
    }

    async fn insert_door_codes(
        &self,
        property_id: &PropertyId,
        codes: &[NewDoorCode],
    ) -> Result<Vec<DoorCode>, PropertyStoreError> {
        let mut state = self.lock()?;
        if !state.has_property(property_id) {
            return Err(PropertyStoreError::not_found("property", property_id.as_str()));
        }
        let taken = |slot| {
            state
                .door_codes
                .iter()
                .any(|code| &code.property_id == property_id && code.slot == slot)
        };
        if let Some(clash) = codes.iter().find(|code| taken(code.slot)) {
            return Err(PropertyStoreError::query(format!(
                "door code slot {} already exists for property {property_id}",
                clash.slot.get()
            )));
        }

        let mut inserted = Vec::with_capacity(codes.len());
        for code in codes {
            let door_code = DoorCode {
                id: DoorCodeId::new(state.next("mem-code-")),
                property_id: property_id.clone(),
                slot: code.slot,
                description: code.description.clone(),
                updated_at: code.updated_at,
                last_used_at: None,
            };
            state.door_codes.push(door_code.clone());
            inserted.push(door_code);
        }
        Ok(inserted)
    }

    async fn insert_group(
        &self,
        property_id: &PropertyId,
        group: &NewGroup,
    ) -> Result<GroupRecord, PropertyStoreError> {
        let mut state = self.lock()?;
        if !state.has_property(property_id) {
            return Err(PropertyStoreError::not_found("property", property_id.as_str()));
        }
        let record = GroupRecord {
            id: GroupId::new(state.next("mem-group-")),
            property_id: property_id.clone(),
            name: group.name.to_string(),
            template: String::new(),
            links: Some(Vec::new()),
            external_ref: group.external_ref.clone(),
        };
        state.groups.push(record.clone());
        Ok(record)
    }

    async fn update_group(
        &self,
        id: &GroupId,
        content: &GroupContent,
    ) -> Result<GroupRecord, PropertyStoreError> {
        let mut state = self.lock()?;
        let group = state
            .groups
            .iter_mut()
            .find(|group| &group.id == id)
            .ok_or_else(|| PropertyStoreError::not_found("group", id.as_str()))?;
        group.template.clone_from(&content.template);
        group.links = Some(content.links.clone());
        Ok(group.clone())
    }

    async fn update_door_code(
        &self,
        id: &DoorCodeId,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<DoorCode, PropertyStoreError> {
        let mut state = self.lock()?;
        let code = state
            .door_codes
            .iter_mut()
            .find(|code| &code.id == id)
            .ok_or_else(|| PropertyStoreError::not_found("door code", id.as_str()))?;
        description.clone_into(&mut code.description);
        code.updated_at = updated_at;
        Ok(code.clone())
    }

    async fn delete_property(&self, id: &PropertyId) -> Result<(), PropertyStoreError> {
        let mut state = self.lock()?;
        state.properties.retain(|property| &property.id != id);
        state.groups.retain(|group| &group.property_id != id);
        state.door_codes.retain(|code| &code.property_id != id);
        Ok(())
    }

    async fn delete_group(&self, id: &GroupId) -> Result<(), PropertyStoreError> {
        self.lock()?.groups.retain(|group| &group.id != id);
        Ok(())
    }
}
