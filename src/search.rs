use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::filtering::{SearchQuery, SearchRequest};
use crate::models::SearchResult;
use crate::pagination::{current_page, page_count};
use crate::schema::ModelSchema;
use crate::traits::{SchemaRegistry, Store};

/// Search bound to one model's schema and a store.
///
/// Immutable once built; `find` keeps all per-call state local, so one
/// instance can serve concurrent requests if the store allows it.
///
/// # Example
/// ```rust,ignore
/// let search = Search::new(&registry, "article", SeaOrmStore::new(db))?;
/// let page = search
///     .find([("title*has", "rust"), ("sort", "title*asc"), ("limit", "10")])
///     .await?;
/// ```
#[derive(Debug)]
pub struct Search<S> {
    schema: ModelSchema,
    store: S,
    config: SearchConfig,
}

impl<S: Store> Search<S> {
    /// Bind a search to `model`.
    ///
    /// # Errors
    /// [`SearchError::UnknownModel`] when the registry does not know `model`.
    pub fn new(registry: &impl SchemaRegistry, model: &str, store: S) -> Result<Self, SearchError> {
        let properties = registry
            .properties_of(model)
            .ok_or_else(|| SearchError::unknown_model(model))?;
        Ok(Self::from_schema(ModelSchema::new(model, properties), store))
    }

    #[must_use]
    pub fn from_schema(schema: ModelSchema, store: S) -> Self {
        Self {
            schema,
            store,
            config: SearchConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Translate `params` without touching the store.
    ///
    /// # Errors
    /// Any validation error, see [`SearchRequest::push`].
    pub fn compile<K, V, I>(&self, params: I) -> Result<SearchQuery, SearchError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let query = SearchRequest::compile(&self.schema, &self.config, params)?;
        tracing::debug!(
            model = %self.schema.name(),
            predicate = %query.predicate,
            order_by = %query.order_by,
            bindings = query.bindings.len(),
            limit = ?query.limit,
            offset = ?query.bounded_offset(),
            "Compiled search"
        );
        Ok(query)
    }

    /// Run the search described by `params`.
    ///
    /// # Errors
    /// Validation errors abort before the store is called; store errors are
    /// passed through as [`SearchError::Store`].
    pub async fn find<K, V, I>(&self, params: I) -> Result<SearchResult<S::Record>, SearchError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let query = self.compile(params)?;
        let model = self.schema.name();

        let result = self.store.find(model, &query).await?;
        let total = self
            .store
            .count(model, &query.predicate, &query.bindings)
            .await?;

        Ok(SearchResult {
            result,
            total,
            limit: query.limit,
            offset: query.offset,
            pages: page_count(total, query.limit),
            page: current_page(query.offset, query.limit),
            query: query.query,
            section: query.section,
        })
    }
}
