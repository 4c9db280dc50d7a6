//! Infrastructure layer with external service adapters.

/// REST backend client.
pub mod api;
/// Application configuration.
pub mod config;

pub use api::RestClient;
pub use config::{AppConfig, CliArgs, ConfigError, ConfigFile, LogLevel};
