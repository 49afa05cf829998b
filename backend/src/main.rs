//! Backend entry-point: selects the property store, wires the REST endpoints
//! and serves them.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use propdesk::config::AppSettings;
use propdesk::inbound::http::health::HealthState;
use propdesk::outbound::store_selection::{StoreOptions, select_store};
use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|e| io::Error::other(format!("configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let store = select_store(StoreOptions {
        database_url: settings.database_url().map(str::to_owned),
        allow_fallback: settings.allow_fallback,
        connect_timeout: settings.database_connect_timeout(),
    })
    .await
    .map_err(io::Error::other)?;
    let mode = store.mode();
    info!(store = %mode, "property store selected");

    let http_state = build_http_state(store.into_port(), &settings)?;
    let health_state = web::Data::new(HealthState::new(mode));
    let server = create_server(health_state, ServerConfig::new(bind_addr, http_state))?;
    info!(%bind_addr, "listening");
    server.await
}
