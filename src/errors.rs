use std::result::Result as StdResult;

use rollover_config::ConfigError;
use rollover_core::CoreError;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for engine, configuration and domain failures.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rollover did not converge: {0}")]
    NonConvergent(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, EngineError>;

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BudgetNotFound(id) | CoreError::TransactionNotFound(id) => {
                EngineError::NotFound(id)
            }
            CoreError::InvalidSpec(message) | CoreError::Validation(message) => {
                EngineError::InvalidInput(message)
            }
            err @ (CoreError::CatchUpLimit { .. } | CoreError::Stalled { .. }) => {
                EngineError::NonConvergent(err.to_string())
            }
            CoreError::Storage(message) => EngineError::StorageError(message),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => EngineError::StorageError(io.to_string()),
            ConfigError::Serde(message) => EngineError::ConfigError(message),
        }
    }
}
