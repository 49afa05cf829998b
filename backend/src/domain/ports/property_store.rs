//! Port for the property store.
//!
//! The [`PropertyStore`] trait is the one capability set shared by the
//! relational adapter and the in-memory fallback. It deals only in flat rows;
//! assembling the nested dashboard view is the domain's job.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::domain::{
    DoorCode, DoorCodeId, GroupContent, GroupId, GroupRecord, NewDoorCode, NewGroup, PropertyId,
    PropertyName, PropertyRecord,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by property store adapters.
    pub enum PropertyStoreError {
        /// The store could not be reached.
        Connection { message: String } =>
            "property store connection failed: {message}",
        /// The store rejected or failed the operation.
        Query { message: String } =>
            "property store query failed: {message}",
        /// A single-row lookup matched nothing.
        NotFound { entity: String, key: String } =>
            "{entity} not found: {key}",
        /// Door-code provisioning failed and the property row could not be
        /// removed again; it needs manual reconciliation.
        OrphanedProperty { property_id: String, message: String } =>
            "property {property_id} was created without door codes and could not be removed: {message}",
    }
}

impl PropertyStoreError {
    /// Whether the failure means the store is unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Which store implementation serves this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreMode {
    /// PostgreSQL via Diesel.
    Relational,
    /// In-process fallback used when the database is unreachable.
    Fallback,
}

impl StoreMode {
    /// Stable lowercase label used in logs and `/health`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property together with the door codes created for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedProperty {
    pub property: PropertyRecord,
    pub door_codes: Vec<DoorCode>,
}

/// Port for property, group and door-code persistence.
///
/// Deleting a property must also remove its groups and door codes. Group
/// deletion is unconditional: deleting an unknown id succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Trivial read used once at startup to decide whether the store is
    /// reachable.
    async fn probe(&self) -> Result<(), PropertyStoreError>;

    /// All properties in store order.
    async fn list_properties(&self) -> Result<Vec<PropertyRecord>, PropertyStoreError>;

    /// Case-insensitive lookup of exactly one property by name.
    ///
    /// Returns [`PropertyStoreError::NotFound`] when nothing matches.
    async fn find_property_by_name(
        &self,
        name: &str,
    ) -> Result<PropertyRecord, PropertyStoreError>;

    /// Groups owned by any of `property_ids`, in one batched read.
    async fn list_groups(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<GroupRecord>, PropertyStoreError>;

    /// Groups whose name matches `name` case-insensitively, across properties.
    async fn list_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<GroupRecord>, PropertyStoreError>;

    /// Door codes owned by any of `property_ids`, in one batched read.
    async fn list_door_codes(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<DoorCode>, PropertyStoreError>;

    /// Insert a property row.
    async fn insert_property(
        &self,
        name: &PropertyName,
    ) -> Result<PropertyRecord, PropertyStoreError>;

    /// Insert door-code rows for an existing property.
    async fn insert_door_codes(
        &self,
        property_id: &PropertyId,
        codes: &[NewDoorCode],
    ) -> Result<Vec<DoorCode>, PropertyStoreError>;

    /// Create a property and its door codes as one logical write.
    ///
    /// The default runs the two inserts in sequence and deletes the property
    /// again if the door codes cannot be inserted. Adapters with transactions
    /// override this with a single atomic write.
    async fn provision_property(
        &self,
        name: &PropertyName,
        codes: &[NewDoorCode],
    ) -> Result<ProvisionedProperty, PropertyStoreError> {
        provision_with_compensation(self, name, codes).await
    }

    /// Insert a group with empty template and links.
    async fn insert_group(
        &self,
        property_id: &PropertyId,
        group: &NewGroup,
    ) -> Result<GroupRecord, PropertyStoreError>;

    /// Replace a group's template and links.
    async fn update_group(
        &self,
        id: &GroupId,
        content: &GroupContent,
    ) -> Result<GroupRecord, PropertyStoreError>;

    /// Replace a door code's description and stamp it with `updated_at`.
    async fn update_door_code(
        &self,
        id: &DoorCodeId,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<DoorCode, PropertyStoreError>;

    /// Delete a property and everything it owns.
    async fn delete_property(&self, id: &PropertyId) -> Result<(), PropertyStoreError>;

    /// Delete a group.
    async fn delete_group(&self, id: &GroupId) -> Result<(), PropertyStoreError>;
}

/// Two-step provisioning with compensating deletion.
///
/// When the door-code insert fails the property row is deleted and the
/// original error returned. If the deletion fails too the result is
/// [`PropertyStoreError::OrphanedProperty`].
pub async fn provision_with_compensation<S>(
    store: &S,
    name: &PropertyName,
    codes: &[NewDoorCode],
) -> Result<ProvisionedProperty, PropertyStoreError>
where
    S: PropertyStore + ?Sized,
{
    let property = store.insert_property(name).await?;
    match store.insert_door_codes(&property.id, codes).await {
        Ok(door_codes) => Ok(ProvisionedProperty {
            property,
            door_codes,
        }),
        Err(provision_error) => {
            warn!(
                property_id = %property.id,
                error = %provision_error,
                "door code provisioning failed; removing property"
            );
            match store.delete_property(&property.id).await {
                Ok(()) => Err(provision_error),
                Err(compensation_error) => {
                    error!(
                        property_id = %property.id,
                        error = %compensation_error,
                        "compensating delete failed; property is orphaned"
                    );
                    Err(PropertyStoreError::orphaned_property(
                        property.id.as_str(),
                        format!("{provision_error}; compensation: {compensation_error}"),
                    ))
                }
            }
        }
    }
}
