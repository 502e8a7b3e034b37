mod error;
mod http_mapping;
mod navigate;
mod types;

pub use error::NavigationError;
pub use http_mapping::navigation_error_to_status_code;
pub use navigate::{ListNavigator, DEFAULT_MAX_PRELOAD_SIZE};
pub use types::NavigationResult;
