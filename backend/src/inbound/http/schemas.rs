//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; these
//! wrappers mirror their JSON shape for documentation only.

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No row matched the identifier or name.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store is unreachable or rejected the operation.
    #[schema(rename = "store_error")]
    StoreError,
    /// An external directory failed or answered with an error.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// Unexpected failure; details are withheld.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Summary of the failure.
    #[schema(example = "Door code not found")]
    error: String,
    /// Underlying message, or structured context for validation failures.
    details: Option<serde_json::Value>,
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// A messaging group attached to a property.
#[derive(ToSchema)]
#[schema(as = crate::domain::Group)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GroupSchema {
    id: String,
    property_id: String,
    #[schema(example = "Guests")]
    name: String,
    #[schema(example = "Welcome!")]
    template: String,
    links: Vec<String>,
    evolution_id: Option<String>,
}

/// One of the eleven door codes of a property.
#[derive(ToSchema)]
#[schema(as = crate::domain::DoorCode)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct DoorCodeSchema {
    id: String,
    property_id: String,
    #[schema(minimum = 0, maximum = 10)]
    code_number: u8,
    description: String,
    updated_at: chrono::DateTime<chrono::Utc>,
    last_used: Option<chrono::DateTime<chrono::Utc>>,
}

/// A property with its groups and door codes nested.
#[derive(ToSchema)]
#[schema(as = crate::domain::PropertyView)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PropertyViewSchema {
    id: String,
    #[schema(example = "Lakeview")]
    name: String,
    #[schema(rename = "whatsAppGroups")]
    whats_app_groups: Vec<GroupSchema>,
    #[schema(rename = "doorCodes")]
    door_codes: Vec<DoorCodeSchema>,
}

/// Groups of a property looked up by name.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::PropertyGroups)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PropertyGroupsSchema {
    property_id: String,
    property_name: String,
    groups: Vec<GroupSchema>,
}

/// A group's template looked up by name.
#[derive(ToSchema)]
#[schema(as = crate::domain::GroupTemplate)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct GroupTemplateSchema {
    group_id: String,
    group_name: String,
    property_id: String,
    property_name: String,
    template: String,
}

/// Candidate property from the listing directory.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::DirectoryProperty)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct DirectoryPropertySchema {
    id: String,
    name: String,
}

/// Candidate group from the messaging directory.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::DirectoryGroup)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct DirectoryGroupSchema {
    #[schema(example = "120363000000000000@g.us")]
    id: String,
    subject: String,
}
