/// Outcome of a successful navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// The whole list, formatted, for client-side paging.
    Preloaded {
        key: String,
        index: i64,
        llen: i64,
        values: Vec<String>,
    },
    /// Only the requested element, formatted.
    Single {
        key: String,
        index: i64,
        llen: i64,
        value: String,
    },
}

impl NavigationResult {
    pub fn key(&self) -> &str {
        match self {
            NavigationResult::Preloaded { key, .. } | NavigationResult::Single { key, .. } => key,
        }
    }

    pub fn index(&self) -> i64 {
        match self {
            NavigationResult::Preloaded { index, .. }
            | NavigationResult::Single { index, .. } => *index,
        }
    }

    pub fn llen(&self) -> i64 {
        match self {
            NavigationResult::Preloaded { llen, .. } | NavigationResult::Single { llen, .. } => {
                *llen
            }
        }
    }

    /// Highest valid index, `llen - 1`.
    pub fn max_index(&self) -> i64 {
        self.llen() - 1
    }

    /// The formatted element at the resolved index.
    pub fn current_value(&self) -> &str {
        match self {
            NavigationResult::Preloaded { values, index, .. } => usize::try_from(*index)
                .ok()
                .and_then(|i| values.get(i))
                .map(String::as_str)
                .unwrap_or_default(),
            NavigationResult::Single { value, .. } => value,
        }
    }

    pub fn is_preloaded(&self) -> bool {
        matches!(self, NavigationResult::Preloaded { .. })
    }
}
