//! Model schemas: which properties a model declares and which of them may be searched.

use sea_orm::{EntityName, EntityTrait, IdenStatic, Iterable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::SearchError;
use crate::traits::SchemaRegistry;

/// One declared property of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub name: String,
    pub searchable: bool,
}

impl PropertySchema {
    #[must_use]
    pub fn new(name: impl Into<String>, searchable: bool) -> Self {
        Self {
            name: name.into(),
            searchable,
        }
    }

    #[must_use]
    pub fn searchable(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    #[must_use]
    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

/// Ordered property list of a single model.
///
/// Declaration order is kept because a bare criterion (`*has=foo`) expands to
/// the searchable properties in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    name: String,
    properties: Vec<PropertySchema>,
}

impl ModelSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<PropertySchema>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Build a schema from a Sea-ORM entity.
    ///
    /// The model is named after the entity's table, properties follow the
    /// column declaration order and a column is searchable when listed in
    /// `searchable`.
    #[must_use]
    pub fn from_entity<E: EntityTrait>(searchable: &[&str]) -> Self {
        let properties = E::Column::iter()
            .map(|column| {
                let name = column.as_str();
                PropertySchema::new(name, searchable.iter().any(|s| *s == name))
            })
            .collect();
        Self::new(E::default().table_name(), properties)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    /// The `searchable` flag of a property, or `None` when the model does not declare it
    #[must_use]
    pub fn is_searchable(&self, property: &str) -> Option<bool> {
        self.properties
            .iter()
            .find(|p| p.name == property)
            .map(|p| p.searchable)
    }

    /// Fail unless `property` is declared and searchable.
    ///
    /// # Errors
    /// [`SearchError::UnknownProperty`] when undeclared,
    /// [`SearchError::NotSearchable`] when declared but not searchable.
    pub fn ensure_searchable(&self, property: &str) -> Result<(), SearchError> {
        match self.is_searchable(property) {
            Some(true) => Ok(()),
            Some(false) => Err(SearchError::not_searchable(&self.name, property)),
            None => Err(SearchError::unknown_property(&self.name, property)),
        }
    }

    /// Names of all searchable properties, in declaration order.
    ///
    /// # Errors
    /// [`SearchError::NoSearchableProperties`] when the model has none.
    pub fn searchable_properties(&self) -> Result<Vec<String>, SearchError> {
        let names: Vec<String> = self
            .properties
            .iter()
            .filter(|p| p.searchable)
            .map(|p| p.name.clone())
            .collect();
        if names.is_empty() {
            return Err(SearchError::no_searchable_properties(&self.name));
        }
        Ok(names)
    }
}

/// In-memory [`SchemaRegistry`] keyed by model name
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelSchema>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema; a schema with the same name is replaced
    pub fn register(&mut self, schema: ModelSchema) -> &mut Self {
        self.models.insert(schema.name.clone(), schema);
        self
    }

    /// Register a Sea-ORM entity, see [`ModelSchema::from_entity`]
    pub fn register_entity<E: EntityTrait>(&mut self, searchable: &[&str]) -> &mut Self {
        self.register(ModelSchema::from_entity::<E>(searchable))
    }

    #[must_use]
    pub fn model_names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }
}

impl SchemaRegistry for ModelRegistry {
    fn properties_of(&self, model: &str) -> Option<Vec<PropertySchema>> {
        self.models.get(model).map(|schema| schema.properties.clone())
    }
}
