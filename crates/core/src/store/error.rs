use thiserror::Error;

/// Errors raised while talking to the backing store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Store command failed: {0}")]
    CommandFailed(String),
    #[error("Unexpected store reply: {0}")]
    UnexpectedReply(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
