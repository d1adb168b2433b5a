use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeirError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Lookup errors
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // Scope errors
    #[error("Account {account_id} already in scope for consumer {consumer_id}")]
    ScopeAlreadyExists {
        consumer_id: String,
        account_id: String,
    },

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type WeirResult<T> = Result<T, WeirError>;
