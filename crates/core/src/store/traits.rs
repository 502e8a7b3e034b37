use async_trait::async_trait;

use super::{KeyType, Result, ScanPage};

/// Read-only view of a key-value store holding lists.
///
/// Every method is one round trip. The batched variants pipeline one command
/// per key and report per-key outcomes; the outer `Result` only fails when
/// the batch as a whole could not be executed.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Returns the type of `key`.
    async fn key_type(&self, key: &str) -> Result<KeyType>;

    /// Returns the length of the list at `key` (0 when absent).
    async fn list_len(&self, key: &str) -> Result<i64>;

    /// Returns the elements between `start` and `stop`, both inclusive.
    /// Negative offsets count from the tail, as `LRANGE` does.
    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>>;

    /// Returns the element at `index`, or `None` when there is none.
    async fn list_index(&self, key: &str, index: i64) -> Result<Option<String>>;

    /// Returns up to roughly `count` keys matching `pattern`, starting at `cursor`.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage>;

    /// Looks up the type of every key in a single round trip.
    async fn key_types(&self, keys: &[String]) -> Result<Vec<Result<KeyType>>>;

    /// Looks up the length of every key in a single round trip.
    async fn list_lens(&self, keys: &[String]) -> Result<Vec<Result<i64>>>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
