//! Messaging groups attached to a property.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::property::{NameValidationError, trimmed_non_empty};
use super::{GroupId, PropertyId};

/// Name of a messaging group; non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    /// Validate and construct a [`GroupName`].
    pub fn new(name: impl Into<String>) -> Result<Self, NameValidationError> {
        trimmed_non_empty(name.into()).map(Self)
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<GroupName> for String {
    fn from(value: GroupName) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = NameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Flat group row as held by a store.
///
/// `links` mirrors the nullable column: lower-level writes may leave it
/// absent. Use [`GroupRecord::into_group`] to obtain the materialised form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    pub property_id: PropertyId,
    pub name: String,
    pub template: String,
    pub links: Option<Vec<String>>,
    pub external_ref: Option<String>,
}

impl GroupRecord {
    /// Materialise the record, backfilling absent links with an empty list.
    pub fn into_group(self) -> Group {
        Group {
            id: self.id,
            property_id: self.property_id,
            name: self.name,
            template: self.template,
            links: self.links.unwrap_or_default(),
            external_ref: self.external_ref,
        }
    }
}

/// Assembled group as returned to the dashboard.
///
/// The messaging-service reference travels as `evolution_id`.
///
/// ## Invariants
/// - `links` is always a sequence, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub property_id: PropertyId,
    pub name: String,
    pub template: String,
    pub links: Vec<String>,
    #[serde(rename = "evolution_id", default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
}

/// Fields for a new group. Template and links start empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: GroupName,
    pub external_ref: Option<String>,
}

/// Full replacement of a group's editable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupContent {
    pub template: String,
    pub links: Vec<String>,
}

/// Template lookup result, resolved by group name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTemplate {
    pub group_id: GroupId,
    pub group_name: String,
    pub property_id: PropertyId,
    pub property_name: String,
    pub template: String,
}
