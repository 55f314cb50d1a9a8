//! Runtime support for the Innermap server: layered configuration,
//! logging bootstrap and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    AppConfig, AuthConfig, CliArgs, DatabaseConfig, LoggingConfig, Section, ServerConfig,
};
