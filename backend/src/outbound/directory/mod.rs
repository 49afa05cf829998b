//! Reqwest adapters for the external selection-picker directories.
//!
//! Both adapters are thin: build one GET request, map transport and status
//! failures, decode the body. No retries and no caching.

mod dto;
mod evolution;
mod hospitable;
mod http;

pub use evolution::{EvolutionEndpoint, EvolutionGroupDirectory};
pub use hospitable::{HospitableEndpoint, HospitablePropertyDirectory};
