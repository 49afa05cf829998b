//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every dashboard, directory and health endpoint plus
//! the schema wrappers from [`crate::inbound::http::schemas`], which keep the
//! domain types free of utoipa derives.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::DeletedResponse;
use crate::inbound::http::dashboard::DashboardResponse;
use crate::inbound::http::directory::DirectoryPropertiesResponse;
use crate::inbound::http::door_codes::{DoorCodeResponse, UpdateDoorCodePayload};
use crate::inbound::http::groups::UpdateGroupPayload;
use crate::inbound::http::health::HealthReport;
use crate::inbound::http::properties::{
    CreateGroupRequest, CreatePropertyRequest, GroupResponse, PropertyResponse,
};
use crate::inbound::http::schemas::{
    DirectoryGroupSchema, DirectoryPropertySchema, DoorCodeSchema, ErrorCodeSchema, ErrorSchema,
    GroupSchema, GroupTemplateSchema, PropertyGroupsSchema, PropertyViewSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Property desk API",
        description = "Properties, their messaging groups and door codes, plus directory lookups."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::dashboard::get_all,
        crate::inbound::http::dashboard::groups_for_property,
        crate::inbound::http::dashboard::group_template,
        crate::inbound::http::properties::create_property,
        crate::inbound::http::properties::delete_property,
        crate::inbound::http::properties::create_group,
        crate::inbound::http::groups::update_group,
        crate::inbound::http::groups::delete_group,
        crate::inbound::http::door_codes::update_door_code,
        crate::inbound::http::directory::list_directory_properties,
        crate::inbound::http::directory::list_directory_groups,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PropertyViewSchema,
        GroupSchema,
        DoorCodeSchema,
        PropertyGroupsSchema,
        GroupTemplateSchema,
        DirectoryPropertySchema,
        DirectoryGroupSchema,
        DashboardResponse,
        PropertyResponse,
        GroupResponse,
        DoorCodeResponse,
        DirectoryPropertiesResponse,
        DeletedResponse,
        CreatePropertyRequest,
        CreateGroupRequest,
        UpdateGroupPayload,
        UpdateDoorCodePayload,
        HealthReport,
    )),
    tags(
        (name = "dashboard", description = "Nested property reads and name lookups"),
        (name = "properties", description = "Property and group creation"),
        (name = "groups", description = "Group template and link edits"),
        (name = "door-codes", description = "Door code descriptions"),
        (name = "directory", description = "Candidate properties and groups from external services"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
