//! Group mutation handlers.
//!
//! ```text
//! PUT    /api/groups/{id}
//! DELETE /api/groups/{id}
//! ```

use actix_web::{delete, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::GroupId;
use crate::domain::ports::UpdateGroupRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::DeletedResponse;
use crate::inbound::http::properties::GroupResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const TEMPLATE: FieldName = FieldName::new("template");
const LINKS: FieldName = FieldName::new("links");

/// Full replacement of a group's template and links.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateGroupPayload {
    #[schema(example = "Welcome to Lakeview!")]
    pub template: Option<String>,
    pub links: Option<Vec<String>>,
}

/// Replace a group's template and links.
#[utoipa::path(
    put,
    path = "/api/groups/{id}",
    tags = ["groups"],
    params(("id" = String, Path, description = "Group id")),
    request_body = UpdateGroupPayload,
    responses(
        (status = 200, description = "Group updated", body = GroupResponse),
        (status = 400, description = "Missing field, or blank link when deduplicating", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[put("/groups/{id}")]
pub async fn update_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateGroupPayload>,
) -> ApiResult<web::Json<GroupResponse>> {
    let UpdateGroupPayload { template, links } = payload.into_inner();
    let request = UpdateGroupRequest {
        group_id: GroupId::new(path.into_inner()),
        template: require(template, TEMPLATE)?,
        links: require(links, LINKS)?,
    };
    let group = state.commands.update_group(request).await?;
    Ok(web::Json(GroupResponse { group }))
}

/// Delete a group. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    tags = ["groups"],
    params(("id" = String, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group deleted", body = DeletedResponse),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[delete("/groups/{id}")]
pub async fn delete_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = GroupId::new(path.into_inner());
    state.commands.delete_group(&id).await?;
    Ok(web::Json(DeletedResponse::default()))
}

#[cfg(test)]
#[path = "groups_tests.rs"]
mod tests;
