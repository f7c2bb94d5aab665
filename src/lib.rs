//! # crudsearch
//!
//! Turns query-string parameters such as
//! `?title*has=rust&views*min=10&sort=views*desc&limit=10` into a
//! parameterized SQL search over one model, runs it against a [`Store`] and
//! returns the records together with pagination metadata.
//!
//! ```rust,ignore
//! let mut registry = ModelRegistry::new();
//! registry.register_entity::<article::Entity>(&["title", "description", "views"]);
//!
//! let search = Search::new(&registry, "articles", SeaOrmStore::new(db))?;
//! let page = search.find(url.query_pairs()).await?;
//! ```

pub mod config;
pub mod database;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod pagination;
pub mod schema;
pub mod search;
pub mod traits;

pub use config::SearchConfig;
pub use database::SeaOrmStore;
pub use errors::SearchError;
pub use filtering::{BoundValue, Bindings, Criterion, Direction, SearchQuery};
pub use models::SearchResult;
pub use schema::{ModelRegistry, ModelSchema, PropertySchema};
pub use search::Search;
pub use traits::{SchemaRegistry, Store};
