use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Record source unavailable for table '{table}': {reason}")]
    SourceUnavailable { table: String, reason: String },

    #[error("Malformed value in field '{field}': {value}")]
    MalformedValue { field: String, value: String },

    #[error("Balance identity violation: credits ({credits}) != debits ({debits}), difference {difference}")]
    BalanceIdentityViolation {
        credits: f64,
        debits: f64,
        difference: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
