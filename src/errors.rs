use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed ledger document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("No week named `{0}` exists")]
    WeekNotFound(String),
    #[error("No session numbered {number} exists in `{week}`")]
    SessionNotFound { week: String, number: u32 },
    #[error("The ledger contains no weeks")]
    EmptyLedger,
}
