use serde::Serialize;

use super::fragments::EchoFragments;
use super::parse::{
    Criterion, Direction, ParsedKey, parse_left_hand_side, parse_right_hand_side_for_sort,
};
use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::schema::ModelSchema;

const PLACEHOLDER_PREFIX: &str = "value";

/// Literal bound to a placeholder at execution time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl BoundValue {
    /// Coerce a range bound: integer when possible, else a finite float.
    ///
    /// # Errors
    /// [`SearchError::InvalidNumber`] when `raw` is neither.
    pub fn numeric(key: &str, raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if let Ok(integer) = trimmed.parse::<i64>() {
            return Ok(Self::Integer(integer));
        }
        match trimmed.parse::<f64>() {
            Ok(float) if float.is_finite() => Ok(Self::Float(float)),
            _ => Err(SearchError::invalid_number(key, raw)),
        }
    }
}

/// Named placeholder values, in the order they were bound
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bindings(Vec<(String, BoundValue)>);

impl Bindings {
    /// Bind `value` under the next free name and return the placeholder (`:valueN`)
    pub fn bind(&mut self, value: BoundValue) -> String {
        let name = format!("{PLACEHOLDER_PREFIX}{}", self.0.len());
        let placeholder = format!(":{name}");
        self.0.push((name, value));
        placeholder
    }

    /// Value bound under `name` (without the leading colon)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fully translated search, ready for a [`Store`](crate::traits::Store)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Boolean expression over validated properties, empty when unfiltered
    pub predicate: String,
    /// `ORDER BY ...` or empty
    pub order_by: String,
    /// The terms of `order_by`: comma-joined properties and their direction
    pub sort: Vec<(String, Direction)>,
    pub bindings: Bindings,
    pub limit: Option<u64>,
    /// Offset as supplied, see [`SearchQuery::bounded_offset`]
    pub offset: Option<u64>,
    /// Echo of the filter and sort parameters
    pub query: String,
    /// Echo of the `limit`/`offset` parameters
    pub section: String,
}

impl SearchQuery {
    /// `WHERE <predicate>`, or empty when there is no predicate
    #[must_use]
    pub fn where_clause(&self) -> String {
        if self.predicate.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.predicate)
        }
    }

    /// The offset to execute with; an offset without a limit is dropped
    #[must_use]
    pub fn bounded_offset(&self) -> Option<u64> {
        self.limit.and(self.offset)
    }
}

/// Per-call accumulator turning parameter pairs into a [`SearchQuery`]
#[derive(Debug)]
pub struct SearchRequest<'a> {
    schema: &'a ModelSchema,
    config: &'a SearchConfig,
    groups: Vec<Vec<String>>,
    sort_terms: Vec<(String, Direction)>,
    bindings: Bindings,
    limit: Option<u64>,
    offset: Option<u64>,
    echo: EchoFragments,
}

impl<'a> SearchRequest<'a> {
    #[must_use]
    pub fn new(schema: &'a ModelSchema, config: &'a SearchConfig) -> Self {
        Self {
            schema,
            config,
            groups: Vec::new(),
            sort_terms: Vec::new(),
            bindings: Bindings::default(),
            limit: None,
            offset: None,
            echo: EchoFragments::default(),
        }
    }

    /// Translate every pair in input order.
    ///
    /// # Errors
    /// The first validation error met; nothing is partially returned.
    pub fn compile<K, V, I>(
        schema: &'a ModelSchema,
        config: &'a SearchConfig,
        params: I,
    ) -> Result<SearchQuery, SearchError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut request = Self::new(schema, config);
        for (key, value) in params {
            request.push(key.as_ref(), value.as_ref())?;
        }
        Ok(request.finish())
    }

    /// Translate one parameter pair.
    ///
    /// # Errors
    /// Unknown or non-searchable properties, a bare criterion on a model
    /// without searchable properties, non-numeric bounds and oversized values.
    pub fn push(&mut self, key: &str, value: &str) -> Result<(), SearchError> {
        match parse_left_hand_side(key, self.schema)? {
            ParsedKey::Limit => return self.push_limit(key, value),
            ParsedKey::Sort => self.push_sort(value)?,
            ParsedKey::Offset => self.offset = Some(parse_count(key, value)?),
            ParsedKey::Filter {
                criterion,
                properties,
            } => self.push_filter(key, criterion, &properties, value)?,
            ParsedKey::NotRecognized => {}
        }
        self.echo.push(key, value);
        Ok(())
    }

    /// A limit above `max_limit` is applied and echoed as `max_limit`
    fn push_limit(&mut self, key: &str, value: &str) -> Result<(), SearchError> {
        let requested = parse_count(key, value)?;
        match self.config.max_limit {
            Some(max) if requested > max => {
                self.limit = Some(max);
                self.echo.push(key, &max.to_string());
            }
            _ => {
                self.limit = Some(requested);
                self.echo.push(key, value);
            }
        }
        Ok(())
    }

    fn push_sort(&mut self, value: &str) -> Result<(), SearchError> {
        let Some(sort) = parse_right_hand_side_for_sort(value) else {
            tracing::debug!(model = %self.schema.name(), value, "Dropping malformed sort value");
            return Ok(());
        };
        for property in &sort.properties {
            self.schema.ensure_searchable(property)?;
        }
        self.sort_terms
            .push((sort.properties.join(","), sort.direction));
        Ok(())
    }

    fn push_filter(
        &mut self,
        key: &str,
        criterion: Criterion,
        properties: &[String],
        value: &str,
    ) -> Result<(), SearchError> {
        let length = value.chars().count();
        if length > self.config.max_value_length {
            return Err(SearchError::ValueTooLong {
                key: key.to_string(),
                length,
                max: self.config.max_value_length,
            });
        }

        let mut group = Vec::with_capacity(properties.len());
        for property in properties {
            self.schema.ensure_searchable(property)?;
            let bound = match criterion {
                Criterion::Min | Criterion::Max => BoundValue::numeric(key, value)?,
                // % and _ in the value stay live wildcards
                Criterion::Has => BoundValue::Text(format!("%{value}%")),
                Criterion::Is => BoundValue::Text(value.to_string()),
            };
            let placeholder = self.bindings.bind(bound);
            group.push(format!("{property} {} {placeholder}", criterion.operator()));
        }
        self.groups.push(group);
        Ok(())
    }

    fn predicate(&self) -> String {
        match self.groups.as_slice() {
            [] => String::new(),
            [single] => single.join(" OR "),
            groups => groups
                .iter()
                .map(|group| format!("({})", group.join(" OR ")))
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }

    fn order_by(&self) -> String {
        if self.sort_terms.is_empty() {
            return String::new();
        }
        let terms: Vec<String> = self
            .sort_terms
            .iter()
            .map(|(properties, direction)| format!("{properties} {}", direction.as_sql()))
            .collect();
        format!("ORDER BY {}", terms.join(", "))
    }

    #[must_use]
    pub fn finish(self) -> SearchQuery {
        let predicate = self.predicate();
        let order_by = self.order_by();
        let (query, section) = self.echo.into_parts();
        SearchQuery {
            predicate,
            order_by,
            sort: self.sort_terms,
            bindings: self.bindings,
            limit: self.limit,
            offset: self.offset,
            query,
            section,
        }
    }
}

fn parse_count(key: &str, value: &str) -> Result<u64, SearchError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| SearchError::invalid_number(key, value))
}
