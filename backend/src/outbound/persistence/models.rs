//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; conversion into domain
//! records happens in the store adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{door_codes, properties, whatsapp_groups};

/// Row read from the properties table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PropertyRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = properties)]
pub(crate) struct NewPropertyRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

/// Row read from the whatsapp_groups table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = whatsapp_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub template: String,
    pub links: Option<Vec<String>>,
    pub external_ref: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = whatsapp_groups)]
pub(crate) struct NewGroupRow<'a> {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: &'a str,
    pub template: &'a str,
    pub links: &'a [String],
    pub external_ref: Option<&'a str>,
}

/// Full replacement of a group's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = whatsapp_groups)]
pub(crate) struct GroupContentUpdate<'a> {
    pub template: &'a str,
    pub links: &'a [String],
}

/// Row read from the door_codes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = door_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DoorCodeRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub code_number: i32,
    pub description: String,
    pub updated_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = door_codes)]
pub(crate) struct NewDoorCodeRow<'a> {
    pub id: Uuid,
    pub property_id: Uuid,
    pub code_number: i32,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = door_codes)]
pub(crate) struct DoorCodeDescriptionUpdate<'a> {
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}
