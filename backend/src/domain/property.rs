//! Property aggregate and its assembled view model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DoorCode, Group, PropertyId};

/// Validation errors for user-supplied names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// The name is empty once surrounding whitespace is removed.
    Empty,
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("name must not be empty"),
        }
    }
}

impl std::error::Error for NameValidationError {}

pub(crate) fn trimmed_non_empty(raw: String) -> Result<String, NameValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameValidationError::Empty);
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Display name of a property.
///
/// ## Invariants
/// - Non-empty after trimming; stored trimmed.
///
/// Uniqueness is a convention only; the store does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyName(String);

impl PropertyName {
    /// Validate and construct a [`PropertyName`].
    ///
    /// # Examples
    /// ```
    /// use propdesk::domain::PropertyName;
    ///
    /// let name = PropertyName::new("  Lakeview ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Lakeview");
    /// assert!(PropertyName::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, NameValidationError> {
        trimmed_non_empty(name.into()).map(Self)
    }
}

impl AsRef<str> for PropertyName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PropertyName> for String {
    fn from(value: PropertyName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PropertyName {
    type Error = NameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Flat property row as held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub name: String,
}

/// Nested property view returned to the dashboard.
///
/// ## Invariants
/// - Every group and door code carries `property_id == id`.
/// - A fully provisioned property has exactly eleven door codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub id: PropertyId,
    pub name: String,
    #[serde(rename = "whatsAppGroups")]
    pub groups: Vec<Group>,
    pub door_codes: Vec<DoorCode>,
}

impl PropertyView {
    /// Build a view from a record and already-filtered child collections.
    pub fn new(record: PropertyRecord, groups: Vec<Group>, door_codes: Vec<DoorCode>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            groups,
            door_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Lakeview", "Lakeview")]
    #[case("  Lakeview\t", "Lakeview")]
    #[case("Casa Azul", "Casa Azul")]
    fn property_name_trims(#[case] raw: &str, #[case] expected: &str) {
        let name = PropertyName::new(raw).expect("valid name");
        assert_eq!(name.as_ref(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n")]
    fn property_name_rejects_blank(#[case] raw: &str) {
        assert_eq!(PropertyName::new(raw), Err(NameValidationError::Empty));
    }

    #[rstest]
    fn view_serialises_with_dashboard_field_names() {
        let view = PropertyView::new(
            PropertyRecord {
                id: PropertyId::new("p1"),
                name: "Lakeview".to_owned(),
            },
            Vec::new(),
            Vec::new(),
        );
        let value = serde_json::to_value(&view).expect("serialise view");
        assert!(value.get("whatsAppGroups").is_some());
        assert!(value.get("doorCodes").is_some());
    }
}
