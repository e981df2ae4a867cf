use rollover_domain::BudgetValidationError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid spec: {0}")]
    InvalidSpec(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Catch-up gave up after {steps} steps")]
    CatchUpLimit { steps: usize },
    #[error("Catch-up stalled after {steps} steps: advancing made no progress")]
    Stalled { steps: usize },
    #[error("Budget not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<BudgetValidationError> for CoreError {
    fn from(err: BudgetValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
