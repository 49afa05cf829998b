//! Property mutation handlers.
//!
//! ```text
//! POST   /api/properties
//! DELETE /api/properties/{id}
//! POST   /api/properties/{id}/groups
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AddGroupRequest, AddPropertyRequest};
use crate::domain::{Group, PropertyId, PropertyView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::DeletedResponse;
use crate::inbound::http::schemas::{ErrorSchema, GroupSchema, PropertyViewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const NAME: FieldName = FieldName::new("name");

/// Request payload for creating a property.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePropertyRequest {
    #[schema(example = "Lakeview")]
    pub name: Option<String>,
}

/// Response payload carrying the created property.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyResponse {
    #[schema(value_type = PropertyViewSchema)]
    pub property: PropertyView,
}

/// Request payload for attaching a group.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[schema(example = "Guests")]
    pub name: Option<String>,
    /// Identifier of the group in the messaging service.
    #[serde(default, alias = "evolution_id", alias = "evolutionId")]
    pub external_ref: Option<String>,
}

/// Response payload carrying a single group.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponse {
    #[schema(value_type = GroupSchema)]
    pub group: Group,
}

/// Create a property together with its eleven door codes.
#[utoipa::path(
    post,
    path = "/api/properties",
    tags = ["properties"],
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = PropertyResponse),
        (status = 400, description = "Missing or blank name", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[post("/properties")]
pub async fn create_property(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePropertyRequest>,
) -> ApiResult<HttpResponse> {
    let name = require(payload.into_inner().name, NAME)?;
    let property = state
        .commands
        .add_property(AddPropertyRequest { name })
        .await?;
    Ok(HttpResponse::Created().json(PropertyResponse { property }))
}

/// Delete a property with its groups and door codes. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tags = ["properties"],
    params(("id" = String, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property deleted", body = DeletedResponse),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[delete("/properties/{id}")]
pub async fn delete_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = PropertyId::new(path.into_inner());
    state.commands.delete_property(&id).await?;
    Ok(web::Json(DeletedResponse::default()))
}

/// Attach a group with an empty template and no links.
#[utoipa::path(
    post,
    path = "/api/properties/{id}/groups",
    tags = ["properties"],
    params(("id" = String, Path, description = "Owning property id")),
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = GroupResponse),
        (status = 400, description = "Missing or blank name", body = ErrorSchema),
        (status = 404, description = "Property not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[post("/properties/{id}/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CreateGroupRequest>,
) -> ApiResult<HttpResponse> {
    let CreateGroupRequest { name, external_ref } = payload.into_inner();
    let request = AddGroupRequest {
        property_id: PropertyId::new(path.into_inner()),
        name: require(name, NAME)?,
        external_ref,
    };
    let group = state.commands.add_group(request).await?;
    Ok(HttpResponse::Created().json(GroupResponse { group }))
}

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;
