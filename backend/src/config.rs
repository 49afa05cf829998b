//! Application settings loaded via OrthoConfig.
//!
//! Every field can be set from the command line, a configuration file or a
//! `PROPDESK_*` environment variable (for example
//! `PROPDESK_DEDUPE_GROUP_LINKS=true`). Defaults live in the accessors.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8085";
const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Settings for the HTTP server, the store and the external directories.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROPDESK")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Absent means the fallback store.
    pub database_url: Option<String>,
    /// Serve from the in-memory store when the database is unreachable.
    #[ortho_config(default = true)]
    pub allow_fallback: bool,
    /// Drop repeated group links on update.
    #[ortho_config(default = false)]
    pub dedupe_group_links: bool,
    /// Seconds allowed for the startup database probe.
    pub database_connect_timeout_secs: Option<u64>,
    /// Base URL of the property listing API.
    pub hospitable_base_url: Option<String>,
    /// Bearer token for the property listing API.
    pub hospitable_token: Option<String>,
    /// Base URL of the messaging-group API.
    pub evolution_base_url: Option<String>,
    /// API key for the messaging-group API.
    pub evolution_api_key: Option<String>,
    /// Messaging instance whose groups are listed.
    pub evolution_instance: Option<String>,
    /// Request timeout for both directories, in seconds. Unset means no
    /// client-level timeout.
    pub directory_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Listen address, falling back to `0.0.0.0:8085`.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    pub fn database_connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.database_connect_timeout_secs
                .unwrap_or(DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn directory_timeout(&self) -> Option<Duration> {
        self.directory_timeout_secs.map(Duration::from_secs)
    }

    /// Listing API base URL and token, when both are set.
    pub fn hospitable(&self) -> Option<(&str, &str)> {
        Some((
            non_blank(self.hospitable_base_url.as_deref())?,
            non_blank(self.hospitable_token.as_deref())?,
        ))
    }

    /// Messaging API base URL, key and instance, when all three are set.
    pub fn evolution(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_blank(self.evolution_base_url.as_deref())?,
            non_blank(self.evolution_api_key.as_deref())?,
            non_blank(self.evolution_instance.as_deref())?,
        ))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 11] = [
        "PROPDESK_BIND_ADDR",
        "PROPDESK_DATABASE_URL",
        "PROPDESK_ALLOW_FALLBACK",
        "PROPDESK_DEDUPE_GROUP_LINKS",
        "PROPDESK_DATABASE_CONNECT_TIMEOUT_SECS",
        "PROPDESK_HOSPITABLE_BASE_URL",
        "PROPDESK_HOSPITABLE_TOKEN",
        "PROPDESK_EVOLUTION_BASE_URL",
        "PROPDESK_EVOLUTION_API_KEY",
        "PROPDESK_EVOLUTION_INSTANCE",
        "PROPDESK_DIRECTORY_TIMEOUT_SECS",
    ];

    fn cleared_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("propdesk")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8085".parse::<SocketAddr>().expect("literal parses")
        );
        assert!(settings.allow_fallback);
        assert!(!settings.dedupe_group_links);
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.directory_timeout(), None);
        assert_eq!(settings.database_connect_timeout(), Duration::from_secs(5));
        assert!(settings.hospitable().is_none());
        assert!(settings.evolution().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_with(&[
            ("PROPDESK_BIND_ADDR", "127.0.0.1:9000"),
            ("PROPDESK_DATABASE_URL", "postgres://localhost/propdesk"),
            ("PROPDESK_ALLOW_FALLBACK", "false"),
            ("PROPDESK_DEDUPE_GROUP_LINKS", "true"),
            ("PROPDESK_HOSPITABLE_BASE_URL", "https://listing.example.test/v2"),
            ("PROPDESK_HOSPITABLE_TOKEN", "secret"),
            ("PROPDESK_DIRECTORY_TIMEOUT_SECS", "3"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("parses").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/propdesk"));
        assert!(!settings.allow_fallback);
        assert!(settings.dedupe_group_links);
        assert_eq!(
            settings.hospitable(),
            Some(("https://listing.example.test/v2", "secret"))
        );
        assert_eq!(settings.directory_timeout(), Some(Duration::from_secs(3)));
    }

    #[rstest]
    fn partial_directory_settings_are_unconfigured() {
        let _guard = lock_env(cleared_with(&[
            ("PROPDESK_EVOLUTION_BASE_URL", "https://evo.example.test"),
            ("PROPDESK_EVOLUTION_API_KEY", "key"),
            ("PROPDESK_EVOLUTION_INSTANCE", "  "),
            ("PROPDESK_DATABASE_URL", " "),
        ]));

        let settings = load_from_empty_args();
        assert!(settings.evolution().is_none());
        assert_eq!(settings.database_url(), None);
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let _guard = lock_env(cleared_with(&[("PROPDESK_BIND_ADDR", "not-an-addr")]));

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }
}
