//! Builders for the HTTP state: domain services over the active store and
//! the configured directory adapters.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use url::Url;
use tracing::{info, warn};

use propdesk::config::AppSettings;
use propdesk::domain::ports::{
    GroupDirectorySource, PropertyDirectorySource, PropertyStore, UnconfiguredDirectory,
};
use propdesk::domain::{DashboardService, DirectoryService, LinkPolicy, PropertyCommandService};
use propdesk::inbound::http::state::HttpState;
use propdesk::outbound::directory::{
    EvolutionEndpoint, EvolutionGroupDirectory, HospitableEndpoint, HospitablePropertyDirectory,
};

fn parse_base_url(name: &str, raw: &str) -> io::Result<Url> {
    Url::parse(raw).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid {name} base URL {raw:?}: {err}"),
        )
    })
}

fn client_error(name: &str, err: &reqwest::Error) -> io::Error {
    io::Error::other(format!("failed to build {name} client: {err}"))
}

/// Listing directory adapter, or [`UnconfiguredDirectory`] when the base URL
/// or token is missing.
pub(crate) fn build_property_directory(
    settings: &AppSettings,
) -> io::Result<Arc<dyn PropertyDirectorySource>> {
    let Some((base_url, token)) = settings.hospitable() else {
        warn!(directory = "property", "directory not configured");
        return Ok(Arc::new(UnconfiguredDirectory));
    };
    let endpoint = HospitableEndpoint {
        base_url: parse_base_url("property directory", base_url)?,
        token: token.to_owned(),
    };
    let directory = HospitablePropertyDirectory::new(endpoint, settings.directory_timeout())
        .map_err(|err| client_error("property directory", &err))?;
    info!(directory = "property", %base_url, "directory configured");
    Ok(Arc::new(directory))
}

/// Messaging directory adapter, or [`UnconfiguredDirectory`] when any of the
/// base URL, key or instance is missing.
pub(crate) fn build_group_directory(
    settings: &AppSettings,
) -> io::Result<Arc<dyn GroupDirectorySource>> {
    let Some((base_url, api_key, instance)) = settings.evolution() else {
        warn!(directory = "group", "directory not configured");
        return Ok(Arc::new(UnconfiguredDirectory));
    };
    let endpoint = EvolutionEndpoint {
        base_url: parse_base_url("group directory", base_url)?,
        api_key: api_key.to_owned(),
        instance: instance.to_owned(),
    };
    let directory = EvolutionGroupDirectory::new(endpoint, settings.directory_timeout())
        .map_err(|err| client_error("group directory", &err))?;
    info!(directory = "group", %base_url, %instance, "directory configured");
    Ok(Arc::new(directory))
}

/// Wire the three driving ports over `store` and the configured directories.
///
/// # Errors
///
/// Returns [`io::Error`] when a directory base URL is malformed or its HTTP
/// client cannot be built.
pub fn build_http_state(
    store: Arc<dyn PropertyStore>,
    settings: &AppSettings,
) -> io::Result<HttpState> {
    let link_policy = LinkPolicy::from_dedupe_flag(settings.dedupe_group_links);
    let dashboard = DashboardService::new(store.clone());
    let commands =
        PropertyCommandService::new(store, Arc::new(DefaultClock)).with_link_policy(link_policy);
    let directory = DirectoryService::new(
        build_property_directory(settings)?,
        build_group_directory(settings)?,
    );
    Ok(HttpState::new(
        Arc::new(dashboard),
        Arc::new(commands),
        Arc::new(directory),
    ))
}
