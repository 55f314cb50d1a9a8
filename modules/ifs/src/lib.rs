//! The Internal Family Systems domain: per-user Systems of Parts,
//! typed Relationships between them, and Journal entries.
//!
//! Layering follows the usual module shape: `contract` holds the pure
//! models and the public API trait, `domain` the service and its
//! invariants, `infra` the SeaORM storage, `api` the REST surface.

pub mod api;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;

pub use domain::service::Service;
