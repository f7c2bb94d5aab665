use serde::Serialize;

/// Outcome of [`Search::find`](crate::search::Search::find).
///
/// `limit` and `offset` echo the request and are omitted when absent, as are
/// `pages` (needs a positive limit) and `page` (needs an offset and a limit).
/// `query` and `section` rebuild the filter/sort and pagination parts of the
/// query string so callers can produce page links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<R> {
    pub result: Vec<R>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    pub query: String,
    pub section: String,
}
