//! Pure mapping of navigation errors to HTTP status codes.

use super::NavigationError;

/// Maps a [`NavigationError`] to an HTTP status code.
///
/// - store failures -> 500 (Internal Server Error)
/// - everything else (bad input, missing key, wrong type, empty list,
///   out-of-bounds index) -> 404 (Not Found)
///
/// # Examples
///
/// ```
/// use rediscan_core::navigator::{navigation_error_to_status_code, NavigationError};
///
/// assert_eq!(navigation_error_to_status_code(&NavigationError::InvalidIndex), 404);
/// ```
pub fn navigation_error_to_status_code(error: &NavigationError) -> u16 {
    if error.is_not_found() {
        404
    } else {
        500
    }
}
