//! Page metadata derived from a total count and the requested window.

/// Number of pages of `limit` records needed for `total`; `None` without a positive limit
#[must_use]
pub fn page_count(total: u64, limit: Option<u64>) -> Option<u64> {
    match limit {
        Some(limit) if limit > 0 => Some(total.div_ceil(limit)),
        _ => None,
    }
}

/// Page reached by `offset`, rounded up; `None` unless both offset and a positive limit are set
#[must_use]
pub fn current_page(offset: Option<u64>, limit: Option<u64>) -> Option<u64> {
    match (offset, limit) {
        (Some(offset), Some(limit)) if limit > 0 => Some(offset.div_ceil(limit)),
        _ => None,
    }
}
