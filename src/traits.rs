use async_trait::async_trait;
use sea_orm::DbErr;

use crate::filtering::{Bindings, SearchQuery};
use crate::schema::PropertySchema;

/// Source of model schemas, looked up by model name
pub trait SchemaRegistry {
    /// Ordered property list of `model`, or `None` for an unknown model
    fn properties_of(&self, model: &str) -> Option<Vec<PropertySchema>>;
}

/// Record store able to execute a compiled search.
///
/// Predicates and ORDER BY clauses only ever reference properties validated
/// against the model schema; every user-supplied value arrives through
/// [`Bindings`] under a `:valueN` placeholder.
#[async_trait]
pub trait Store: Send + Sync {
    type Record: Send;

    /// Records matching `query`, sorted and bounded by its limit/offset
    async fn find(&self, model: &str, query: &SearchQuery) -> Result<Vec<Self::Record>, DbErr>;

    /// Number of records matching `predicate`, ignoring any pagination
    async fn count(&self, model: &str, predicate: &str, bindings: &Bindings) -> Result<u64, DbErr>;
}
