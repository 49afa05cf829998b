//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL store via Diesel.
//! - **memory**: in-process fallback store for development.
//! - **directory**: reqwest clients for the external picker directories.
//! - **store_selection**: startup probe choosing between the two stores.
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business logic.

pub mod directory;
pub mod memory;
pub mod persistence;
pub mod store_selection;
