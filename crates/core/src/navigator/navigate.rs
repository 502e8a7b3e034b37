//! Index navigation over a single list.

use std::sync::Arc;

use crate::format::format_value;
use crate::store::{KeyType, ListStore};

use super::{NavigationError, NavigationResult};

/// Lists at or below this length are preloaded in full by default.
pub const DEFAULT_MAX_PRELOAD_SIZE: usize = 1000;

type Result<T> = std::result::Result<T, NavigationError>;

/// Resolves index requests against live lists.
///
/// Small lists (`llen <= max_preload_size`) are read in one `LRANGE` so the
/// page can move through them without further requests. Larger lists fetch
/// only the requested element.
#[derive(Clone)]
pub struct ListNavigator {
    store: Arc<dyn ListStore>,
    max_preload_size: usize,
}

impl ListNavigator {
    pub fn new(store: Arc<dyn ListStore>, max_preload_size: usize) -> Self {
        Self {
            store,
            max_preload_size,
        }
    }

    /// Returns true when a list of `llen` elements is preloaded.
    pub fn should_preload(&self, llen: i64) -> bool {
        u64::try_from(llen).is_ok_and(|len| len <= self.max_preload_size as u64)
    }

    /// Looks up `index` in the list at `key`.
    ///
    /// A missing or empty `index` selects the newest (last) element. The
    /// checks run in order: key present, key type, list length, index
    /// parsing, bounds. The first one that fails is returned.
    pub async fn navigate(
        &self,
        key: Option<&str>,
        index: Option<&str>,
    ) -> Result<NavigationResult> {
        let key = match key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(NavigationError::MissingKey),
        };

        match self
            .store
            .key_type(key)
            .await
            .map_err(NavigationError::store("Error checking key"))?
        {
            KeyType::List => {}
            KeyType::Absent => {
                return Err(NavigationError::KeyNotFound {
                    key: key.to_string(),
                })
            }
            KeyType::Other(key_type) => {
                return Err(NavigationError::NotAList {
                    key: key.to_string(),
                    key_type,
                })
            }
        }

        let llen = self
            .store
            .list_len(key)
            .await
            .map_err(NavigationError::store("Error getting list length"))?;
        if llen == 0 {
            return Err(NavigationError::EmptyList {
                key: key.to_string(),
            });
        }

        let index = resolve_index(index, llen)?;
        check_bounds(index, llen)?;

        if self.should_preload(llen) {
            self.preload(key, index).await
        } else {
            self.fetch_single(key, index, llen).await
        }
    }

    async fn preload(&self, key: &str, index: i64) -> Result<NavigationResult> {
        let raw = self
            .store
            .list_range(key, 0, -1)
            .await
            .map_err(NavigationError::store("Error getting list elements"))?;

        // The list may have changed since LLEN; the array read is what the page pages through.
        let llen = raw.len() as i64;
        if llen == 0 {
            return Err(NavigationError::EmptyList {
                key: key.to_string(),
            });
        }
        check_bounds(index, llen)?;

        tracing::debug!(key, index, llen, "Preloaded list");

        Ok(NavigationResult::Preloaded {
            key: key.to_string(),
            index,
            llen,
            values: raw.iter().map(|value| format_value(value)).collect(),
        })
    }

    async fn fetch_single(&self, key: &str, index: i64, llen: i64) -> Result<NavigationResult> {
        let value = self
            .store
            .list_index(key, index)
            .await
            .map_err(NavigationError::store("Error getting element"))?
            .ok_or(NavigationError::OutOfBounds { index, llen })?;

        tracing::debug!(key, index, llen, "Fetched single element");

        Ok(NavigationResult::Single {
            key: key.to_string(),
            index,
            llen,
            value: format_value(&value),
        })
    }
}

/// Resolves the requested index, defaulting to the newest element.
fn resolve_index(index: Option<&str>, llen: i64) -> Result<i64> {
    match index {
        None | Some("") => Ok(llen - 1),
        Some(raw) => raw.parse().map_err(|_| NavigationError::InvalidIndex),
    }
}

fn check_bounds(index: i64, llen: i64) -> Result<()> {
    if index < 0 || index >= llen {
        return Err(NavigationError::OutOfBounds { index, llen });
    }
    Ok(())
}
