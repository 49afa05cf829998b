//! Directory pass-through handlers backing the selection pickers.
//!
//! ```text
//! GET /api/hospitable/properties
//! GET /api/whatsapp/groups
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{DirectoryGroup, DirectoryProperty};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DirectoryGroupSchema, DirectoryPropertySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Candidate properties wrapped the way the listing service returns them.
#[derive(Debug, Serialize, ToSchema)]
pub struct DirectoryPropertiesResponse {
    #[schema(value_type = Vec<DirectoryPropertySchema>)]
    pub data: Vec<DirectoryProperty>,
}

/// Candidate properties from the listing service.
#[utoipa::path(
    get,
    path = "/api/hospitable/properties",
    tags = ["directory"],
    responses(
        (status = 200, description = "Candidate properties", body = DirectoryPropertiesResponse),
        (status = 500, description = "Directory failure", body = ErrorSchema)
    )
)]
#[get("/hospitable/properties")]
pub async fn list_directory_properties(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DirectoryPropertiesResponse>> {
    let data = state.directory.list_properties().await?;
    Ok(web::Json(DirectoryPropertiesResponse { data }))
}

/// Candidate groups from the messaging service.
#[utoipa::path(
    get,
    path = "/api/whatsapp/groups",
    tags = ["directory"],
    responses(
        (status = 200, description = "Candidate groups", body = Vec<DirectoryGroupSchema>),
        (status = 500, description = "Directory failure", body = ErrorSchema)
    )
)]
#[get("/whatsapp/groups")]
pub async fn list_directory_groups(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DirectoryGroup>>> {
    let groups = state.directory.list_groups().await?;
    Ok(web::Json(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockDirectoryQuery;
    use crate::inbound::http::test_utils::{send, state_with_directory, test_app};
    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::json;

    #[actix_web::test]
    async fn wraps_properties_in_data() {
        let mut directory = MockDirectoryQuery::new();
        directory.expect_list_properties().return_once(|| {
            Ok(vec![DirectoryProperty {
                id: "42".to_owned(),
                name: "Lakeview".to_owned(),
            }])
        });
        let app = actix_test::init_service(test_app(state_with_directory(directory))).await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::get().uri("/api/hospitable/properties"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": [{ "id": "42", "name": "Lakeview" }] }));
    }

    #[actix_web::test]
    async fn returns_groups_as_bare_array() {
        let mut directory = MockDirectoryQuery::new();
        directory.expect_list_groups().return_once(|| {
            Ok(vec![DirectoryGroup {
                id: "120363@g.us".to_owned(),
                subject: "Guests".to_owned(),
            }])
        });
        let app = actix_test::init_service(test_app(state_with_directory(directory))).await;

        let (status, body) =
            send(&app, actix_test::TestRequest::get().uri("/api/whatsapp/groups")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "id": "120363@g.us", "subject": "Guests" }]));
    }

    #[actix_web::test]
    async fn upstream_failure_keeps_status_in_details() {
        let mut directory = MockDirectoryQuery::new();
        directory.expect_list_groups().return_once(|| {
            Err(Error::upstream("Failed to fetch directory groups").with_details(json!({
                "message": "directory responded with status 401",
                "upstreamStatus": 401,
            })))
        });
        let app = actix_test::init_service(test_app(state_with_directory(directory))).await;

        let (status, body) =
            send(&app, actix_test::TestRequest::get().uri("/api/whatsapp/groups")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "upstream_error");
        assert_eq!(body["details"]["upstreamStatus"], 401);
    }
}
