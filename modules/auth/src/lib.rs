//! User accounts and the bearer-credential boundary.
//!
//! Everything behind `/api` trusts this module to resolve an
//! `Authorization: Bearer …` header into an unforgeable user id; see
//! [`api::extract::AuthUser`].

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod token;

pub use api::extract::AuthUser;
pub use domain::service::Service;
pub use token::TokenKeys;
