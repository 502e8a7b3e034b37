//! In-memory store implementation.
//!
//! Backs the demo mode and the test suites. Keys are kept in a `BTreeMap` so
//! scans walk them in a stable order, and any operation can be made to fail
//! to exercise error paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{glob_matches, KeyType, ListStore, Result, ScanPage, StoreError};

/// Store operations that can be counted and made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    KeyType,
    ListLen,
    ListRange,
    ListIndex,
    Scan,
    KeyTypes,
    ListLens,
    Ping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultMode {
    Always,
    Once,
    /// Succeed this many more calls, then fail every call.
    After(usize),
}

#[derive(Debug, Clone)]
enum Entry {
    List(Vec<String>),
    Scalar { type_name: String },
}

impl Entry {
    fn key_type(&self) -> KeyType {
        match self {
            Entry::List(_) => KeyType::List,
            Entry::Scalar { type_name } => KeyType::from_type_name(type_name),
        }
    }
}

fn wrong_type() -> StoreError {
    StoreError::CommandFailed(
        "WRONGTYPE Operation against a key holding the wrong kind of value".to_string(),
    )
}

/// In-memory store for tests and demo mode.
///
/// Clones share the same keyspace, faults and counters.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    keyspace: Arc<RwLock<BTreeMap<String, Entry>>>,
    faults: Arc<Mutex<HashMap<StoreOp, FaultMode>>>,
    calls: Arc<Mutex<HashMap<StoreOp, usize>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `values` to the tail of the list at `key`, creating it if needed.
    ///
    /// Replaces any non-list value stored under `key`.
    pub async fn push_list<I, S>(&self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keyspace = self.keyspace.write().await;
        let entry = keyspace
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()));
        if !matches!(entry, Entry::List(_)) {
            *entry = Entry::List(Vec::new());
        }
        if let Entry::List(list) = entry {
            list.extend(values.into_iter().map(Into::into));
        }
    }

    /// Stores a non-list key of the given type (`string`, `hash`, ...).
    pub async fn set_typed(&self, key: &str, type_name: &str) {
        self.keyspace.write().await.insert(
            key.to_string(),
            Entry::Scalar {
                type_name: type_name.to_string(),
            },
        );
    }

    /// Removes a key of any type.
    pub async fn remove(&self, key: &str) {
        self.keyspace.write().await.remove(key);
    }

    /// Makes every subsequent call to `op` fail.
    pub fn fail(&self, op: StoreOp) {
        self.lock_faults().insert(op, FaultMode::Always);
    }

    /// Makes only the next call to `op` fail.
    pub fn fail_once(&self, op: StoreOp) {
        self.lock_faults().insert(op, FaultMode::Once);
    }

    /// Lets `calls` more calls to `op` succeed, then fails every call.
    pub fn fail_after(&self, op: StoreOp, calls: usize) {
        self.lock_faults().insert(op, FaultMode::After(calls));
    }

    /// Clears any fault configured for `op`.
    pub fn heal(&self, op: StoreOp) {
        self.lock_faults().remove(&op);
    }

    /// Number of times `op` has been invoked.
    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    fn lock_faults(&self) -> std::sync::MutexGuard<'_, HashMap<StoreOp, FaultMode>> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a call to `op` and returns the injected failure, if any.
    fn enter(&self, op: StoreOp) -> Result<()> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(op)
            .or_insert(0) += 1;

        let mut faults = self.lock_faults();
        match faults.get(&op).copied() {
            Some(FaultMode::Always) => {}
            Some(FaultMode::Once) => {
                faults.remove(&op);
            }
            Some(FaultMode::After(0)) => {
                faults.insert(op, FaultMode::Always);
            }
            Some(FaultMode::After(remaining)) => {
                faults.insert(op, FaultMode::After(remaining - 1));
                return Ok(());
            }
            None => return Ok(()),
        }
        Err(StoreError::ConnectionFailed(format!(
            "injected failure for {op:?}"
        )))
    }

    fn len_of(entry: Option<&Entry>) -> Result<i64> {
        match entry {
            None => Ok(0),
            Some(Entry::List(list)) => Ok(list.len() as i64),
            Some(Entry::Scalar { .. }) => Err(wrong_type()),
        }
    }
}

/// Resolves an `LRANGE`-style inclusive range against a list of `len` items.
fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len || stop < 0 {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl ListStore for InMemoryStore {
    async fn key_type(&self, key: &str) -> Result<KeyType> {
        self.enter(StoreOp::KeyType)?;
        let keyspace = self.keyspace.read().await;
        Ok(keyspace
            .get(key)
            .map(Entry::key_type)
            .unwrap_or(KeyType::Absent))
    }

    async fn list_len(&self, key: &str) -> Result<i64> {
        self.enter(StoreOp::ListLen)?;
        let keyspace = self.keyspace.read().await;
        Self::len_of(keyspace.get(key))
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        self.enter(StoreOp::ListRange)?;
        let keyspace = self.keyspace.read().await;
        match keyspace.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(list)) => Ok(resolve_range(list.len(), start, stop)
                .map(|(from, to)| list[from..=to].to_vec())
                .unwrap_or_default()),
            Some(Entry::Scalar { .. }) => Err(wrong_type()),
        }
    }

    async fn list_index(&self, key: &str, index: i64) -> Result<Option<String>> {
        self.enter(StoreOp::ListIndex)?;
        let keyspace = self.keyspace.read().await;
        match keyspace.get(key) {
            None => Ok(None),
            Some(Entry::List(list)) => {
                let position = if index < 0 {
                    index + list.len() as i64
                } else {
                    index
                };
                Ok(usize::try_from(position)
                    .ok()
                    .and_then(|p| list.get(p).cloned()))
            }
            Some(Entry::Scalar { .. }) => Err(wrong_type()),
        }
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        self.enter(StoreOp::Scan)?;
        let keyspace = self.keyspace.read().await;
        let count = count.max(1);
        let start = usize::try_from(cursor).unwrap_or(usize::MAX);

        let keys = keyspace
            .keys()
            .skip(start)
            .take(count)
            .filter(|key| glob_matches(pattern, key))
            .cloned()
            .collect();

        let end = start.saturating_add(count);
        let next_cursor = if end >= keyspace.len() { 0 } else { end as u64 };

        Ok(ScanPage { keys, next_cursor })
    }

    async fn key_types(&self, keys: &[String]) -> Result<Vec<Result<KeyType>>> {
        self.enter(StoreOp::KeyTypes)?;
        let keyspace = self.keyspace.read().await;
        Ok(keys
            .iter()
            .map(|key| {
                Ok(keyspace
                    .get(key)
                    .map(Entry::key_type)
                    .unwrap_or(KeyType::Absent))
            })
            .collect())
    }

    async fn list_lens(&self, keys: &[String]) -> Result<Vec<Result<i64>>> {
        self.enter(StoreOp::ListLens)?;
        let keyspace = self.keyspace.read().await;
        Ok(keys
            .iter()
            .map(|key| Self::len_of(keyspace.get(key)))
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.enter(StoreOp::Ping)
    }
}
