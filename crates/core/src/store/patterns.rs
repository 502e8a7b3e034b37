//! Glob matching for `SCAN ... MATCH` patterns.
//!
//! Supports `*` (any sequence, including empty) and `?` (exactly one
//! character). Every other character matches itself.

/// Checks if a key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use rediscan_core::store::glob_matches;
///
/// assert!(glob_matches("*", "anything"));
/// assert!(glob_matches("queue:*", "queue:jobs"));
/// assert!(glob_matches("log:?", "log:1"));
/// assert!(!glob_matches("queue:*", "cache:jobs"));
/// ```
pub fn glob_matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    // Position of the last `*` seen and the key position it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, k));
                p += 1;
            }
            Some('?') => {
                p += 1;
                k += 1;
            }
            Some(c) if *c == key[k] => {
                p += 1;
                k += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    k = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
