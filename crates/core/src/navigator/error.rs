use thiserror::Error;

use crate::store::StoreError;

/// Reasons a navigation request yields no element.
///
/// Every variant except [`NavigationError::Store`] describes a query that
/// simply found nothing and is rendered as "not found".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Missing 'key' parameter")]
    MissingKey,
    #[error("Key '{key}' does not exist")]
    KeyNotFound { key: String },
    #[error("Key '{key}' is not a list (type: {key_type})")]
    NotAList { key: String, key_type: String },
    #[error("List '{key}' is empty")]
    EmptyList { key: String },
    #[error("Invalid 'index' parameter")]
    InvalidIndex,
    #[error("Index {index} out of bounds (list length: {llen})")]
    OutOfBounds { index: i64, llen: i64 },
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        source: StoreError,
    },
}

impl NavigationError {
    /// Returns true unless the store itself failed.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, NavigationError::Store { .. })
    }

    pub(crate) fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| NavigationError::Store { context, source }
    }
}
