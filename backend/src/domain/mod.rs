//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed property, group and door-code model,
//! the ports adapters implement, and the services that drive them. Nothing
//! here depends on HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`) with its stable `ErrorCode`.
//! - Typed identifiers and names for properties, groups and door codes.
//! - DashboardService, PropertyCommandService and DirectoryService.

pub mod dashboard_service;
pub mod directory_service;
pub mod door_code;
pub mod error;
pub mod group;
pub mod ids;
pub mod links;
pub mod ports;
pub mod property;
pub mod property_service;
mod store_error_mapping;
pub mod trace_id;

pub use self::dashboard_service::DashboardService;
pub use self::directory_service::DirectoryService;
pub use self::door_code::{
    DOOR_CODE_SLOT_COUNT, DoorCode, DoorCodeSlot, NewDoorCode, SlotOutOfRange, door_code_block,
    is_complete_block,
};
pub use self::error::{Error, ErrorCode};
pub use self::group::{Group, GroupContent, GroupName, GroupRecord, GroupTemplate, NewGroup};
pub use self::ids::{DoorCodeId, GroupId, PropertyId};
pub use self::links::{LinkPolicy, LinkValidationError};
pub use self::property::{NameValidationError, PropertyName, PropertyRecord, PropertyView};
pub use self::property_service::PropertyCommandService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use propdesk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
