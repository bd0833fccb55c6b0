//! # CLI Error Type
//!
//! Unified error type for command handlers.
//!
//! ```text
//! ConfigError ──┐
//! DbError ──────┼──► CliError ──► "error: ..." on stderr, exit code 1
//! serde_json ───┤
//! std::io ──────┘
//! ```

use drnekin_config::ConfigError;
use drnekin_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("No customer with public id '{0}'")]
    CustomerNotFound(String),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
