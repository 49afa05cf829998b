//! PostgreSQL-backed `PropertyStore` using Diesel.
//!
//! Identifiers are UUIDs generated here and exposed to the domain as text.
//! A path identifier that is not a UUID cannot match any row, so lookups treat
//! it as not found and deletes treat it as already gone.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{PropertyStore, PropertyStoreError, ProvisionedProperty};
use crate::domain::{
    DoorCode, DoorCodeId, DoorCodeSlot, GroupContent, GroupId, GroupRecord, NewDoorCode,
    NewGroup, PropertyId, PropertyName, PropertyRecord,
};

use super::models::{
    DoorCodeDescriptionUpdate, DoorCodeRow, GroupContentUpdate, GroupRow, NewDoorCodeRow,
    NewGroupRow, NewPropertyRow, PropertyRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{door_codes, properties, whatsapp_groups};

diesel::define_sql_function! {
    /// PostgreSQL `lower(text)`.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel implementation of [`PropertyStore`].
#[derive(Clone)]
pub struct DieselPropertyStore {
    pool: DbPool,
}

impl DieselPropertyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PropertyStoreError {
    PropertyStoreError::connection(error.into_message())
}

/// Build a mapper for Diesel failures on the row `entity`/`key`.
///
/// Diesel's `NotFound` becomes [`PropertyStoreError::NotFound`]; so does a
/// foreign-key violation, which only happens when the owning property is
/// missing.
fn map_diesel_error<'a>(
    entity: &'static str,
    key: &'a str,
) -> impl FnOnce(DieselError) -> PropertyStoreError + 'a {
    move |error| {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), entity, key, "diesel operation failed");
            }
            _ => debug!(error = %error, entity, key, "diesel operation failed"),
        }

        match error {
            DieselError::NotFound => PropertyStoreError::not_found(entity, key),
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                PropertyStoreError::not_found("property", key)
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                PropertyStoreError::connection(info.message().to_owned())
            }
            DieselError::DatabaseError(_, info) => {
                PropertyStoreError::query(info.message().to_owned())
            }
            other => PropertyStoreError::query(other.to_string()),
        }
    }
}

fn parse_uuid(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn parse_uuids<'a>(ids: impl IntoIterator<Item = &'a PropertyId>) -> Vec<Uuid> {
    ids.into_iter().filter_map(|id| parse_uuid(id.as_str())).collect()
}

fn property_from_row(row: PropertyRow) -> PropertyRecord {
    PropertyRecord {
        id: PropertyId::new(row.id.to_string()),
        name: row.name,
    }
}

fn group_from_row(row: GroupRow) -> GroupRecord {
    GroupRecord {
        id: GroupId::new(row.id.to_string()),
        property_id: PropertyId::new(row.property_id.to_string()),
        name: row.name,
        template: row.template,
        links: row.links,
        external_ref: row.external_ref,
    }
}

fn door_code_from_row(row: DoorCodeRow) -> Result<DoorCode, PropertyStoreError> {
    let slot = DoorCodeSlot::new(i64::from(row.code_number))
        .map_err(|err| PropertyStoreError::query(format!("door code {}: {err}", row.id)))?;
    Ok(DoorCode {
        id: DoorCodeId::new(row.id.to_string()),
        property_id: PropertyId::new(row.property_id.to_string()),
        slot,
        description: row.description,
        updated_at: row.updated_at,
        last_used_at: row.last_used_at,
    })
}

fn door_codes_from_rows(rows: Vec<DoorCodeRow>) -> Result<Vec<DoorCode>, PropertyStoreError> {
    rows.into_iter().map(door_code_from_row).collect()
}

fn new_door_code_rows(property_id: Uuid, codes: &[NewDoorCode]) -> Vec<NewDoorCodeRow<'_>> {
    codes
        .iter()
        .map(|code| NewDoorCodeRow {
            id: Uuid::new_v4(),
            property_id,
            code_number: i32::from(code.slot.get()),
            description: &code.description,
            updated_at: code.updated_at,
        })
        .collect()
}

#[async_trait]
impl PropertyStore for DieselPropertyStore {
    async fn probe(&self) -> Result<(), PropertyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        properties::table
            .select(properties::id)
            .limit(1)
            .load::<Uuid>(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("property", "probe"))
    }

    async fn list_properties(&self) -> Result<Vec<PropertyRecord>, PropertyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PropertyRow> = properties::table
            .order((properties::created_at.asc(), properties::id.asc()))
            .select(PropertyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("property", "*"))?;
        Ok(rows.into_iter().map(property_from_row).collect())
    }

    async fn find_property_by_name(
        &self,
        name: &str,
    ) -> Result<PropertyRecord, PropertyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut rows: Vec<PropertyRow> = properties::table
            .filter(lower(properties::name).eq(lower(name.trim())))
            .order(properties::created_at.asc())
            .select(PropertyRow::as_select())
            .limit(2)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("property", name))?;

        match (rows.pop(), rows.is_empty()) {
            (Some(row), true) => Ok(property_from_row(row)),
            (Some(_), false) => Err(PropertyStoreError::query(format!(
                "more than one property is named {name:?}"
            ))),
            (None, _) => Err(PropertyStoreError::not_found("property", name)),
        }
    }

    async fn list_groups(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<GroupRecord>, PropertyStoreError> {
        let ids = parse_uuids(property_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroupRow> = whatsapp_groups::table
            .filter(whatsapp_groups::property_id.eq_any(&ids))
            .order((whatsapp_groups::created_at.asc(), whatsapp_groups::id.asc()))
            .select(GroupRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("group", "*"))?;
        Ok(rows.into_iter().map(group_from_row).collect())
    }

    async fn list_groups_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<GroupRecord>, PropertyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroupRow> = whatsapp_groups::table
            .filter(lower(whatsapp_groups::name).eq(lower(name.trim())))
            .order((whatsapp_groups::created_at.asc(), whatsapp_groups::id.asc()))
            .select(GroupRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("group", name))?;
        Ok(rows.into_iter().map(group_from_row).collect())
    }

    async fn list_door_codes(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<DoorCode>, PropertyStoreError> {
        let ids = parse_uuids(property_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DoorCodeRow> = door_codes::table
            .filter(door_codes::property_id.eq_any(&ids))
            .order((door_codes::property_id.asc(), door_codes::code_number.asc()))
            .select(DoorCodeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("door code", "*"))?;
        door_codes_from_rows(rows)
    }

    async fn insert_property(
        &self,
        name: &PropertyName,
    ) -> Result<PropertyRecord, PropertyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(properties::table)
            .values(&NewPropertyRow {
                id: Uuid::new_v4(),
                name: name.as_ref(),
            })
            .returning(PropertyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("property", name.as_ref()))?;
        Ok(property_from_row(row))
    }

    async fn insert_door_codes(
        &self,
        property_id: &PropertyId,
        codes: &[NewDoorCode],
    ) -> Result<Vec<DoorCode>, PropertyStoreError> {
        let owner = parse_uuid(property_id.as_str())
            .ok_or_else(|| PropertyStoreError::not_found("property", property_id.as_str()))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::insert_into(door_codes::table)
            .values(&new_door_code_rows(owner, codes))
            .returning(DoorCodeRow::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(map_diesel_error("door code", property_id.as_str()))?;
        door_codes_from_rows(rows)
    }

    /// Property and door codes are written in one transaction; a failure
    /// leaves no rows behind.
    async fn provision_property(
        &self,
        name: &PropertyName,
        codes: &[NewDoorCode],
    ) -> Result<ProvisionedProperty, PropertyStoreError> {
        let property_id = Uuid::new_v4();
        let new_property = NewPropertyRow {
            id: property_id,
            name: name.as_ref(),
        };
        let new_codes = new_door_code_rows(property_id, codes);
        let new_property = &new_property;
        let new_codes = &new_codes;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (property_row, code_rows) = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let property = diesel::insert_into(properties::table)
                        .values(new_property)
                        .returning(PropertyRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let codes = diesel::insert_into(door_codes::table)
                        .values(new_codes)
                        .returning(DoorCodeRow::as_returning())
                        .get_results(conn)
                        .await?;
                    Ok((property, codes))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error("property", name.as_ref()))?;

        Ok(ProvisionedProperty {
            property: property_from_row(property_row),
            door_codes: door_codes_from_rows(code_rows)?,
        })
    }

    async fn insert_group(
        &self,
        property_id: &PropertyId,
        group: &NewGroup,
    ) -> Result<GroupRecord, PropertyStoreError> {
        let owner = parse_uuid(property_id.as_str())
            .ok_or_else(|| PropertyStoreError::not_found("property", property_id.as_str()))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(whatsapp_groups::table)
            .values(&NewGroupRow {
                id: Uuid::new_v4(),
                property_id: owner,
                name: group.name.as_ref(),
                template: "",
                links: &[],
                external_ref: group.external_ref.as_deref(),
            })
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("group", property_id.as_str()))?;
        Ok(group_from_row(row))
    }

    async fn update_group(
        &self,
        id: &GroupId,
        content: &GroupContent,
    ) -> Result<GroupRecord, PropertyStoreError> {
        let key = parse_uuid(id.as_str())
            .ok_or_else(|| PropertyStoreError::not_found("group", id.as_str()))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(whatsapp_groups::table.find(key))
            .set(&GroupContentUpdate {
                template: &content.template,
                links: &content.links,
            })
            .returning(GroupRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("group", id.as_str()))?;
        Ok(group_from_row(row))
    }

    async fn update_door_code(
        &self,
        id: &DoorCodeId,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<DoorCode, PropertyStoreError> {
        let key = parse_uuid(id.as_str())
            .ok_or_else(|| PropertyStoreError::not_found("door code", id.as_str()))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(door_codes::table.find(key))
            .set(&DoorCodeDescriptionUpdate {
                description,
                updated_at,
            })
            .returning(DoorCodeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error("door code", id.as_str()))?;
        door_code_from_row(row)
    }

    async fn delete_property(&self, id: &PropertyId) -> Result<(), PropertyStoreError> {
        let Some(key) = parse_uuid(id.as_str()) else {
            return Ok(());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(properties::table.find(key))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("property", id.as_str()))
    }

    async fn delete_group(&self, id: &GroupId) -> Result<(), PropertyStoreError> {
        let Some(key) = parse_uuid(id.as_str()) else {
            return Ok(());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(whatsapp_groups::table.find(key))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error("group", id.as_str()))
    }
}
