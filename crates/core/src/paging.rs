//! Pure paging rules for stepping through a list.
//!
//! Index 0 is the oldest element (list head) and `max_index` the newest. The
//! rendering layer calls [`step`] for every older/newer action so paging
//! behaves the same with or without a preloaded array.

/// Where a paging step leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// Show this index from the preloaded array, no request needed.
    Local(i64),
    /// Request this index from the server.
    Fetch(i64),
    /// Request the list again without an index so the newest element is shown.
    FetchNewest,
}

/// Computes the target of moving `delta` positions from `current`.
///
/// Moving past the newest element wraps around to index 0. Moving before
/// index 0 never clamps; it re-requests the newest element so data appended
/// since the page was rendered becomes visible.
///
/// # Examples
///
/// ```
/// use rediscan_core::paging::{step, PageTarget};
///
/// assert_eq!(step(2, 1, 2, true), PageTarget::Local(0));
/// assert_eq!(step(0, -1, 2, true), PageTarget::FetchNewest);
/// assert_eq!(step(1, 1, 2, false), PageTarget::Fetch(2));
/// ```
pub fn step(current: i64, delta: i64, max_index: i64, preloaded: bool) -> PageTarget {
    let next = current.saturating_add(delta);
    if next < 0 {
        return PageTarget::FetchNewest;
    }

    let next = if next > max_index { 0 } else { next };
    if preloaded {
        PageTarget::Local(next)
    } else {
        PageTarget::Fetch(next)
    }
}

impl PageTarget {
    /// Query string for `/lindex` that reaches this target.
    ///
    /// `encoded_key` must already be percent-encoded.
    pub fn query(&self, encoded_key: &str) -> String {
        match self {
            PageTarget::Local(index) | PageTarget::Fetch(index) => {
                format!("key={encoded_key}&index={index}")
            }
            PageTarget::FetchNewest => format!("key={encoded_key}"),
        }
    }
}
