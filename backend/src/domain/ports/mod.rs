//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`PropertyStore`], [`PropertyDirectorySource`],
//! [`GroupDirectorySource`]) are implemented by outbound adapters. Driving
//! ports ([`DashboardQuery`], [`PropertyCommand`], [`DirectoryQuery`]) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_query;
mod directory_query;
mod directory_source;
mod property_command;
mod property_store;

#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, GroupTemplateRequest, PropertyGroups};
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use directory_source::{MockGroupDirectorySource, MockPropertyDirectorySource};
pub use directory_source::{
    DirectoryGroup, DirectoryProperty, DirectorySourceError, GroupDirectorySource,
    PropertyDirectorySource, UnconfiguredDirectory,
};
#[cfg(test)]
pub use property_command::MockPropertyCommand;
pub use property_command::{
    AddGroupRequest, AddPropertyRequest, PropertyCommand, UpdateDoorCodeRequest,
    UpdateGroupRequest,
};
#[cfg(test)]
pub use property_store::MockPropertyStore;
pub use property_store::{
    PropertyStore, PropertyStoreError, ProvisionedProperty, StoreMode,
    provision_with_compensation,
};
