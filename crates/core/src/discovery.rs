//! Discovery of list keys through incremental cursor scans.
//!
//! The keyspace is walked with `SCAN` in bounded batches, never `KEYS`, so
//! discovery is safe on keyspaces of any size. Each batch costs at most three
//! round trips: the scan itself, one pipelined `TYPE` for every key in it and
//! one pipelined `LLEN` for the keys that turned out to be lists.

use std::sync::Arc;

use crate::store::{ListStore, Result};

/// Keys requested per `SCAN` call.
pub const DEFAULT_SCAN_BATCH_SIZE: usize = 100;

/// Maximum number of lists shown on the index page by default.
pub const DEFAULT_MAX_LISTS: usize = 10;

/// A discovered list and its length at the time it was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub name: String,
    pub size: i64,
}

/// Finds list keys in the store.
#[derive(Clone)]
pub struct ListScanner {
    store: Arc<dyn ListStore>,
    batch_size: usize,
    pattern: String,
}

impl ListScanner {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store,
            batch_size: DEFAULT_SCAN_BATCH_SIZE,
            pattern: "*".to_string(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Restricts discovery to keys matching a glob pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Returns up to `max_results` lists with their sizes.
    ///
    /// Never fails. A failed scan call ends discovery with whatever was
    /// collected so far; a failed type or length batch is logged and skipped.
    /// Scanning stops as soon as `max_results` lists have been found.
    pub async fn discover(&self, max_results: usize) -> Vec<ListSummary> {
        let mut lists = Vec::new();
        if max_results == 0 {
            return lists;
        }

        let mut cursor = 0;
        loop {
            let page = match self
                .store
                .scan(cursor, &self.pattern, self.batch_size)
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        cursor,
                        found = lists.len(),
                        "Scan failed, returning partial results"
                    );
                    return lists;
                }
            };

            if !page.keys.is_empty() {
                match self.summarize_batch(&page.keys).await {
                    Ok(batch) => {
                        for summary in batch {
                            lists.push(summary);
                            if lists.len() >= max_results {
                                return lists;
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            batch = page.keys.len(),
                            "Pipeline error, skipping batch"
                        );
                    }
                }
            }

            cursor = page.next_cursor;
            if cursor == 0 {
                break;
            }
        }

        lists
    }

    /// Types then sizes one scan batch; keys whose own lookup failed are dropped.
    async fn summarize_batch(&self, keys: &[String]) -> Result<Vec<ListSummary>> {
        let types = self.store.key_types(keys).await?;
        let list_keys: Vec<String> = keys
            .iter()
            .zip(types)
            .filter_map(|(key, key_type)| match key_type {
                Ok(key_type) if key_type.is_list() => Some(key.clone()),
                _ => None,
            })
            .collect();

        if list_keys.is_empty() {
            return Ok(Vec::new());
        }

        let sizes = self.store.list_lens(&list_keys).await?;
        Ok(list_keys
            .into_iter()
            .zip(sizes)
            .filter_map(|(name, size)| size.ok().map(|size| ListSummary { name, size }))
            .collect())
    }
}
