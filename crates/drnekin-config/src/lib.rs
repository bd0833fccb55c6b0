//! # drnekin-config: Settings and Storage Paths
//!
//! Typed settings persisted in `config.json`, plus the rules that decide
//! where that file and the SQLite database live on each platform.
//!
//! ## Module Organization
//!
//! - [`config`] - `AppConfig` and its defaults
//! - [`store`] - Load / save with admin token bootstrap
//! - [`paths`] - Environment-aware path resolution
//! - [`error`] - Settings error types
//!
//! ## Environment Variables
//! - `QR_CONFIG_PATH` - settings file location
//! - `QR_DB_PATH` - database file location
//! - `ADMIN_TOKEN` - admin token override (wins over the stored value)

pub mod config;
pub mod error;
pub mod paths;
pub mod store;

pub use config::{AppConfig, AppMode, QrMode};
pub use error::{ConfigError, ConfigResult};
pub use paths::PathEnv;
pub use store::ConfigStore;
