//! One-shot choice between the relational store and the in-memory fallback.
//!
//! The database is probed once at startup. A connectivity failure switches
//! the process to the fallback store for its whole lifetime (when allowed);
//! any other failure aborts startup. The choice is never revisited.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::ports::{PropertyStore, PropertyStoreError, StoreMode};
use crate::outbound::memory::InMemoryPropertyStore;
use crate::outbound::persistence::{DbPool, DieselPropertyStore, PoolConfig};

/// Inputs to [`select_store`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub database_url: Option<String>,
    /// Use the fallback store when the database cannot be reached.
    pub allow_fallback: bool,
    /// Bound on the startup probe's connection attempt.
    pub connect_timeout: Duration,
}

/// Reasons startup cannot settle on a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreSelectionError {
    #[error("no database URL configured and the fallback store is disabled")]
    NoDatabase,
    #[error("database unreachable and the fallback store is disabled: {0}")]
    Unreachable(#[source] PropertyStoreError),
    #[error("database probe failed: {0}")]
    Probe(#[source] PropertyStoreError),
}

/// The store serving this process.
pub enum ActiveStore {
    Relational(DieselPropertyStore),
    Fallback(InMemoryPropertyStore),
}

impl ActiveStore {
    pub fn mode(&self) -> StoreMode {
        match self {
            Self::Relational(_) => StoreMode::Relational,
            Self::Fallback(_) => StoreMode::Fallback,
        }
    }

    /// Erase the variant for injection into the domain services.
    pub fn into_port(self) -> Arc<dyn PropertyStore> {
        match self {
            Self::Relational(store) => Arc::new(store),
            Self::Fallback(store) => Arc::new(store),
        }
    }
}

/// Probe the configured database and commit to a store.
///
/// # Errors
///
/// See [`StoreSelectionError`].
pub async fn select_store(options: StoreOptions) -> Result<ActiveStore, StoreSelectionError> {
    let Some(database_url) = options.database_url else {
        if !options.allow_fallback {
            return Err(StoreSelectionError::NoDatabase);
        }
        warn!(
            store = StoreMode::Fallback.as_str(),
            "no database URL configured; serving from the in-memory fallback store"
        );
        return Ok(ActiveStore::Fallback(InMemoryPropertyStore::new()));
    };

    let probed = probe_database(database_url, options.connect_timeout).await;
    Ok(match commit(probed, options.allow_fallback)? {
        Some(store) => {
            info!(store = StoreMode::Relational.as_str(), "using relational store");
            ActiveStore::Relational(store)
        }
        None => ActiveStore::Fallback(InMemoryPropertyStore::new()),
    })
}

async fn probe_database(
    database_url: String,
    connect_timeout: Duration,
) -> Result<DieselPropertyStore, PropertyStoreError> {
    let config = PoolConfig::new(database_url).with_connection_timeout(connect_timeout);
    let pool = DbPool::new(config)
        .await
        .map_err(|err| PropertyStoreError::connection(err.into_message()))?;
    let store = DieselPropertyStore::new(pool);
    store.probe().await?;
    Ok(store)
}

/// Decide from a probe result: `Some` keeps the probed store, `None` means
/// switch to the fallback.
fn commit<S>(
    probed: Result<S, PropertyStoreError>,
    allow_fallback: bool,
) -> Result<Option<S>, StoreSelectionError> {
    match probed {
        Ok(store) => Ok(Some(store)),
        Err(err) if err.is_connectivity() && allow_fallback => {
            warn!(
                store = StoreMode::Fallback.as_str(),
                error = %err,
                "database unreachable; serving from the in-memory fallback store until restart"
            );
            Ok(None)
        }
        Err(err) if err.is_connectivity() => Err(StoreSelectionError::Unreachable(err)),
        Err(err) => Err(StoreSelectionError::Probe(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn options(database_url: Option<&str>, allow_fallback: bool) -> StoreOptions {
        StoreOptions {
            database_url: database_url.map(str::to_owned),
            allow_fallback,
            connect_timeout: Duration::from_millis(100),
        }
    }

    #[rstest]
    fn healthy_probe_keeps_relational() {
        assert!(matches!(commit(Ok(()), true), Ok(Some(()))));
    }

    #[rstest]
    fn connectivity_failure_falls_back_when_allowed() {
        let probed: Result<(), _> = Err(PropertyStoreError::connection("refused"));
        assert!(matches!(commit(probed, true), Ok(None)));
    }

    #[rstest]
    fn connectivity_failure_is_fatal_without_fallback() {
        let probed: Result<(), _> = Err(PropertyStoreError::connection("refused"));
        assert!(matches!(
            commit(probed, false),
            Err(StoreSelectionError::Unreachable(_))
        ));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn query_failure_is_always_fatal(#[case] allow_fallback: bool) {
        let probed: Result<(), _> = Err(PropertyStoreError::query("relation does not exist"));
        assert!(matches!(
            commit(probed, allow_fallback),
            Err(StoreSelectionError::Probe(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_url_selects_fallback() {
        let store = select_store(options(None, true)).await.expect("fallback");
        assert_eq!(store.mode(), StoreMode::Fallback);
        let port = store.into_port();
        assert!(port.list_properties().await.expect("empty").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_url_without_fallback_is_rejected() {
        assert!(matches!(
            select_store(options(None, false)).await,
            Err(StoreSelectionError::NoDatabase)
        ));
    }
}
