//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised against any store.

use std::sync::Arc;

use crate::domain::ports::{DashboardQuery, DirectoryQuery, PropertyCommand};

/// Port bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dashboard: Arc<dyn DashboardQuery>,
    pub commands: Arc<dyn PropertyCommand>,
    pub directory: Arc<dyn DirectoryQuery>,
}

impl HttpState {
    pub fn new(
        dashboard: Arc<dyn DashboardQuery>,
        commands: Arc<dyn PropertyCommand>,
        directory: Arc<dyn DirectoryQuery>,
    ) -> Self {
        Self {
            dashboard,
            commands,
            directory,
        }
    }
}
