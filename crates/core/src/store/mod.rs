//! Store abstraction consumed by the navigator and the scanner.

mod error;
mod memory;
mod patterns;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use memory::{InMemoryStore, StoreOp};
pub use patterns::glob_matches;
pub use traits::ListStore;
pub use types::{KeyType, ScanPage};
