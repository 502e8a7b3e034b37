//! Redis store backend.
//!
//! Read-only: issues `TYPE`, `LLEN`, `LRANGE`, `LINDEX`, `SCAN` and `PING`,
//! pipelining the batched lookups used by discovery.

mod error;
mod store;

pub use store::RedisListStore;
