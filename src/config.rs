use serde::Deserialize;

const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// Tunables for a [`Search`](crate::search::Search).
///
/// The defaults leave requests untouched apart from rejecting filter values
/// longer than 10 000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound applied to `limit`; larger requests are clamped
    pub max_limit: Option<u64>,
    /// Longest accepted filter value
    pub max_value_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_limit: None,
            max_value_length: MAX_FIELD_VALUE_LENGTH,
        }
    }
}
