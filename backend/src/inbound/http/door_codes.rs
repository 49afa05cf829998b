//! Door-code handler.
//!
//! ```text
//! PUT /api/door-codes/{id}
//! ```

use actix_web::{put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateDoorCodeRequest;
use crate::domain::{DoorCode, DoorCodeId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DoorCodeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// New description for a door code. An empty string clears it.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateDoorCodePayload {
    #[schema(example = "Front gate")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoorCodeResponse {
    #[schema(value_type = DoorCodeSchema)]
    pub door_code: DoorCode,
}

/// Replace a door code's description and refresh `updated_at`.
#[utoipa::path(
    put,
    path = "/api/door-codes/{id}",
    tags = ["door-codes"],
    params(("id" = String, Path, description = "Door code id")),
    request_body = UpdateDoorCodePayload,
    responses(
        (status = 200, description = "Door code updated", body = DoorCodeResponse),
        (status = 400, description = "Missing description", body = ErrorSchema),
        (status = 404, description = "Door code not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    )
)]
#[put("/door-codes/{id}")]
pub async fn update_door_code(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateDoorCodePayload>,
) -> ApiResult<web::Json<DoorCodeResponse>> {
    let request = UpdateDoorCodeRequest {
        door_code_id: DoorCodeId::new(path.into_inner()),
        description: require(
            payload.into_inner().description,
            FieldName::new("description"),
        )?,
    };
    let door_code = state.commands.update_door_code(request).await?;
    Ok(web::Json(DoorCodeResponse { door_code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPropertyCommand;
    use crate::domain::{DoorCodeSlot, Error, PropertyId};
    use crate::inbound::http::test_utils::{send, state_with_commands, test_app};
    use actix_web::{http::StatusCode, test as actix_test};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn updated(description: &str) -> DoorCode {
        DoorCode {
            id: DoorCodeId::new("c-4"),
            property_id: PropertyId::new("p-1"),
            slot: DoorCodeSlot::new(4).expect("valid slot"),
            description: description.to_owned(),
            updated_at: Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
            last_used_at: None,
        }
    }

    #[actix_web::test]
    async fn updates_description() {
        let mut commands = MockPropertyCommand::new();
        commands
            .expect_update_door_code()
            .withf(|request| {
                request.door_code_id.as_str() == "c-4" && request.description == "Front gate"
            })
            .times(1)
            .return_once(|request| Ok(updated(&request.description)));
        let app = actix_test::init_service(test_app(state_with_commands(commands))).await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/door-codes/c-4")
                .set_json(json!({ "description": "Front gate" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["doorCode"]["code_number"], 4);
        assert_eq!(body["doorCode"]["description"], "Front gate");
    }

    #[actix_web::test]
    async fn missing_description_is_rejected_before_the_service() {
        let mut commands = MockPropertyCommand::new();
        commands.expect_update_door_code().times(0);
        let app = actix_test::init_service(test_app(state_with_commands(commands))).await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/door-codes/c-4")
                .set_json(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "description");
    }

    #[actix_web::test]
    async fn unknown_door_code_is_not_found() {
        let mut commands = MockPropertyCommand::new();
        commands
            .expect_update_door_code()
            .return_once(|_| Err(Error::not_found("Door code not found")));
        let app = actix_test::init_service(test_app(state_with_commands(commands))).await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/door-codes/missing")
                .set_json(json!({ "description": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["error"], "Door code not found");
    }
}
