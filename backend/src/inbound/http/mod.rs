//! HTTP inbound adapter exposing the dashboard REST endpoints.

pub mod dashboard;
pub mod directory;
pub mod door_codes;
pub mod error;
pub mod groups;
pub mod health;
pub mod properties;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

pub use crate::domain::ApiResult;

/// Body returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = true)]
    pub success: bool,
}

impl Default for DeletedResponse {
    fn default() -> Self {
        Self { success: true }
    }
}

/// Every dashboard route mounted under `/api`.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(validation::json_config())
        .service(dashboard::get_all)
        .service(dashboard::groups_for_property)
        .service(dashboard::group_template)
        .service(properties::create_property)
        .service(properties::delete_property)
        .service(properties::create_group)
        .service(groups::update_group)
        .service(groups::delete_group)
        .service(door_codes::update_door_code)
        .service(directory::list_directory_properties)
        .service(directory::list_directory_groups)
}
