//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::Value;

use crate::domain::ports::{
    MockDashboardQuery, MockDirectoryQuery, MockPropertyCommand, UnconfiguredDirectory,
};
use crate::domain::{DashboardService, DirectoryService, LinkPolicy, PropertyCommandService};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryPropertyStore;

/// State backed by a fresh in-memory store and unconfigured directories.
pub fn memory_state() -> HttpState {
    memory_state_with(LinkPolicy::default())
}

pub fn memory_state_with(link_policy: LinkPolicy) -> HttpState {
    let store = Arc::new(InMemoryPropertyStore::new());
    let directories = Arc::new(UnconfiguredDirectory);
    let commands = PropertyCommandService::new(store.clone(), Arc::new(DefaultClock))
        .with_link_policy(link_policy);
    HttpState::new(
        Arc::new(DashboardService::new(store)),
        Arc::new(commands),
        Arc::new(DirectoryService::new(directories.clone(), directories)),
    )
}

fn mocked(
    dashboard: MockDashboardQuery,
    commands: MockPropertyCommand,
    directory: MockDirectoryQuery,
) -> HttpState {
    HttpState::new(Arc::new(dashboard), Arc::new(commands), Arc::new(directory))
}

pub fn state_with_dashboard(dashboard: MockDashboardQuery) -> HttpState {
    mocked(dashboard, MockPropertyCommand::new(), MockDirectoryQuery::new())
}

pub fn state_with_commands(commands: MockPropertyCommand) -> HttpState {
    mocked(MockDashboardQuery::new(), commands, MockDirectoryQuery::new())
}

pub fn state_with_directory(directory: MockDirectoryQuery) -> HttpState {
    mocked(MockDashboardQuery::new(), MockPropertyCommand::new(), directory)
}

/// App serving the `/api` scope over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(api_scope())
}

/// Send `request` and decode the JSON body (`Null` when empty).
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}
