use std::fmt;

/// Type of a key as reported by the store's `TYPE` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    /// The key does not exist (`none`).
    Absent,
    List,
    /// Any other type, carrying the name the store reported.
    Other(String),
}

impl KeyType {
    /// Parses a `TYPE` reply.
    ///
    /// ```
    /// use rediscan_core::store::KeyType;
    ///
    /// assert_eq!(KeyType::from_type_name("none"), KeyType::Absent);
    /// assert_eq!(KeyType::from_type_name("list"), KeyType::List);
    /// assert_eq!(KeyType::from_type_name("hash"), KeyType::Other("hash".into()));
    /// ```
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "none" => KeyType::Absent,
            "list" => KeyType::List,
            other => KeyType::Other(other.to_string()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, KeyType::List)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Absent => f.write_str("none"),
            KeyType::List => f.write_str("list"),
            KeyType::Other(name) => f.write_str(name),
        }
    }
}

/// One batch returned by a cursor-based scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub keys: Vec<String>,
    /// Cursor for the next call; `0` means the iteration is complete.
    pub next_cursor: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_type_name() {
        assert_eq!(KeyType::from_type_name("none"), KeyType::Absent);
        assert_eq!(KeyType::from_type_name("list"), KeyType::List);
        assert_eq!(
            KeyType::from_type_name("string"),
            KeyType::Other("string".to_string())
        );
        assert_eq!(
            KeyType::from_type_name("stream"),
            KeyType::Other("stream".to_string())
        );
    }

    #[test]
    fn test_display_round_trips_type_name() {
        for name in ["none", "list", "zset", "ReJSON-RL"] {
            assert_eq!(KeyType::from_type_name(name).to_string(), name);
        }
    }

    #[test]
    fn test_is_list() {
        assert!(KeyType::List.is_list());
        assert!(!KeyType::Absent.is_list());
        assert!(!KeyType::Other("set".to_string()).is_list());
    }
}
