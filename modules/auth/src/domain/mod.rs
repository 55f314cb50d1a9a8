pub mod error;
pub mod service;
