//! Store backends for the server.
//!
//! The in-memory store lives in `rediscan_core::store` and is used for demo
//! mode and tests; Redis is the production backend.

mod redis_impl;

pub use redis_impl::RedisListStore;
