//! Dashboard read handlers.
//!
//! ```text
//! GET /api/data
//! GET /api/properties/{name}/groups
//! GET /api/groups/{name}/template?property=
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{GroupTemplateRequest, PropertyGroups};
use crate::domain::{GroupTemplate, PropertyView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, GroupTemplateSchema, PropertyGroupsSchema, PropertyViewSchema,
};
use crate::inbound::http::state::HttpState;

/// Response payload for `GET /api/data`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(value_type = Vec<PropertyViewSchema>)]
    pub properties: Vec<PropertyView>,
}

/// Optional scoping for template lookups.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TemplateQuery {
    /// Property name; required when the group name is shared by several
    /// properties.
    pub property: Option<String>,
}

/// Every property with its groups and door codes.
#[utoipa::path(
    get,
    path = "/api/data",
    tags = ["dashboard"],
    responses(
        (status = 200, description = "All properties", body = DashboardResponse),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[get("/data")]
pub async fn get_all(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardResponse>> {
    let properties = state.dashboard.get_all().await?;
    Ok(web::Json(DashboardResponse { properties }))
}

/// Groups of one property, looked up by name case-insensitively.
#[utoipa::path(
    get,
    path = "/api/properties/{name}/groups",
    tags = ["dashboard"],
    params(("name" = String, Path, description = "Property name")),
    responses(
        (status = 200, description = "Groups of the property", body = PropertyGroupsSchema),
        (status = 404, description = "Property not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[get("/properties/{name}/groups")]
pub async fn groups_for_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PropertyGroups>> {
    let name = path.into_inner();
    let groups = state.dashboard.groups_for_property(&name).await?;
    Ok(web::Json(groups))
}

/// Template of a group looked up by name.
#[utoipa::path(
    get,
    path = "/api/groups/{name}/template",
    tags = ["dashboard"],
    params(("name" = String, Path, description = "Group name"), TemplateQuery),
    responses(
        (status = 200, description = "Group template", body = GroupTemplateSchema),
        (status = 400, description = "Group name is ambiguous", body = ErrorSchema),
        (status = 404, description = "Group or property not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[get("/groups/{name}/template")]
pub async fn group_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<TemplateQuery>,
) -> ApiResult<web::Json<GroupTemplate>> {
    let request = GroupTemplateRequest {
        group_name: path.into_inner(),
        property_name: query
            .into_inner()
            .property
            .filter(|name| !name.trim().is_empty()),
    };
    let template = state.dashboard.group_template(request).await?;
    Ok(web::Json(template))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
