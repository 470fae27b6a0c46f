use thiserror::Error;

use crate::ledger::ExpenseId;

/// Rejections produced by ledger operations. State is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(f64),
    #[error("Insufficient balance: {required} required, {available} available")]
    InsufficientBalance { required: f64, available: f64 },
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures raised by persistence adapters and configuration files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Failures that end the terminal shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
