//! Wire shapes of the directory responses.

use serde::Deserialize;

use crate::domain::ports::{DirectoryGroup, DirectoryProperty};

/// Listing-service envelope: `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub(super) struct PropertyListDto {
    #[serde(default)]
    pub(super) data: Vec<PropertyDto>,
}

/// Only `id` and `name` are read; the listing service sends many more fields.
#[derive(Debug, Deserialize)]
pub(super) struct PropertyDto {
    pub(super) id: IdDto,
    pub(super) name: String,
}

/// Group entry from the messaging service; the body is a bare array.
#[derive(Debug, Deserialize)]
pub(super) struct GroupDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) subject: Option<String>,
}

/// Identifiers arrive as strings or numbers depending on the account.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdDto {
    Text(String),
    Number(i64),
}

impl From<IdDto> for String {
    fn from(value: IdDto) -> Self {
        match value {
            IdDto::Text(text) => text,
            IdDto::Number(number) => number.to_string(),
        }
    }
}

impl PropertyListDto {
    pub(super) fn into_domain(self) -> Vec<DirectoryProperty> {
        self.data
            .into_iter()
            .map(|property| DirectoryProperty {
                id: property.id.into(),
                name: property.name,
            })
            .collect()
    }
}

impl GroupDto {
    pub(super) fn into_domain(self) -> DirectoryGroup {
        DirectoryGroup {
            id: self.id,
            subject: self.subject.unwrap_or_default(),
        }
    }
}
