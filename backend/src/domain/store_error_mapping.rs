//! Translation of store failures into domain errors.
//!
//! Every failure is logged here with the operation name and target id so the
//! failing call can be reconstructed from logs alone.

use serde_json::json;
use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::ports::PropertyStoreError;

/// Context for a failed store call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StoreCall<'a> {
    /// Operation name, e.g. `update_door_code`.
    pub operation: &'static str,
    /// Identifier or name the call targeted, if any.
    pub target: Option<&'a str>,
    /// Client-facing summary for generic failures.
    pub summary: &'static str,
    /// Client-facing summary when the target does not exist.
    pub not_found: &'static str,
}

impl<'a> StoreCall<'a> {
    pub(crate) const fn new(operation: &'static str, summary: &'static str) -> Self {
        Self {
            operation,
            target: None,
            summary,
            not_found: "Not found",
        }
    }

    pub(crate) const fn target(mut self, target: &'a str) -> Self {
        self.target = Some(target);
        self
    }

    pub(crate) const fn not_found(mut self, message: &'static str) -> Self {
        self.not_found = message;
        self
    }

    /// Map `err` to a domain [`Error`], logging it with this call's context.
    pub(crate) fn fail(self, err: PropertyStoreError) -> Error {
        let target = self.target.unwrap_or("-");
        match err {
            PropertyStoreError::NotFound { .. } => {
                warn!(operation = self.operation, target, error = %err, "store lookup found no row");
                Error::not_found(self.not_found).with_cause(&err)
            }
            PropertyStoreError::OrphanedProperty {
                ref property_id,
                ref message,
            } => {
                error!(
                    operation = self.operation,
                    target,
                    property_id = property_id.as_str(),
                    error = %err,
                    "property left without door codes; manual reconciliation required"
                );
                Error::store(self.summary).with_details(json!({
                    "code": "orphaned_property",
                    "propertyId": property_id,
                    "message": message,
                }))
            }
            PropertyStoreError::Connection { .. } | PropertyStoreError::Query { .. } => {
                error!(operation = self.operation, target, error = %err, "store operation failed");
                Error::store(self.summary).with_cause(&err)
            }
        }
    }
}
