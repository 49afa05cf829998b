//! PostgreSQL persistence via Diesel with `diesel-async` and `bb8` pooling.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module; only the store adapter and pool types are exported.
//!
//! ```ignore
//! use propdesk::outbound::persistence::{DbPool, DieselPropertyStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/propdesk")).await?;
//! let store = DieselPropertyStore::new(pool);
//! ```

mod diesel_property_store;
mod models;
mod pool;
mod schema;

pub use diesel_property_store::DieselPropertyStore;
pub use pool::{DbPool, PoolConfig, PoolError};
