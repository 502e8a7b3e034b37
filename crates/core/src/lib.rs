//! Functional core for rediscan.
//!
//! Everything in this crate is independent of HTTP and of any concrete Redis
//! client. The binary crate supplies a [`store::ListStore`] implementation and
//! renders the plain data returned from here.

pub mod discovery;
pub mod format;
pub mod navigator;
pub mod paging;
pub mod store;
