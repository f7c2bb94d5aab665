use serde::Serialize;

use crate::errors::SearchError;
use crate::schema::ModelSchema;

/// Joins property names inside keys and sort values.
///
/// `+` would be the natural choice but HTTP form decoding turns it into a space.
pub const SEPARATOR: char = '*';

pub const SORT_KEY: &str = "sort";
pub const LIMIT_KEY: &str = "limit";
pub const OFFSET_KEY: &str = "offset";

/// Filter operator selected by a key suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// `*min`: property >= value
    Min,
    /// `*max`: property <= value
    Max,
    /// `*has`: property LIKE %value%
    Has,
    /// `*is`: property = value
    Is,
}

impl Criterion {
    /// Suffix scan order, first match wins
    pub const ALL: [Self; 4] = [Self::Min, Self::Max, Self::Has, Self::Is];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Min => "*min",
            Self::Max => "*max",
            Self::Has => "*has",
            Self::Is => "*is",
        }
    }

    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Min => ">=",
            Self::Max => "<=",
            Self::Has => "LIKE",
            Self::Is => "=",
        }
    }
}

/// Sort direction selected by a sort value suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub const ALL: [Self; 2] = [Self::Ascending, Self::Descending];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Ascending => "*asc",
            Self::Descending => "*desc",
        }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Meaning of a parameter key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedKey {
    Sort,
    Offset,
    Limit,
    Filter {
        criterion: Criterion,
        properties: Vec<String>,
    },
    /// Not part of the grammar; echoed back but never filtered on
    NotRecognized,
}

/// A well-formed sort value such as `title*desc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSortValue {
    pub direction: Direction,
    pub properties: Vec<String>,
}

fn split_properties(list: &str) -> Vec<String> {
    list.split(SEPARATOR).map(str::to_string).collect()
}

/// Classify a parameter key.
///
/// `sort`, `limit` and `offset` are matched exactly before any suffix. A key
/// ending in a criterion suffix becomes a filter over the `*`-separated
/// properties in front of it, or over every searchable property when nothing
/// precedes the suffix.
///
/// Properties are not validated here beyond the bare-criterion fallback;
/// the caller checks each one against the schema.
///
/// # Errors
/// [`SearchError::NoSearchableProperties`] for a bare criterion on a model
/// without searchable properties.
pub fn parse_left_hand_side(key: &str, schema: &ModelSchema) -> Result<ParsedKey, SearchError> {
    match key {
        SORT_KEY => return Ok(ParsedKey::Sort),
        OFFSET_KEY => return Ok(ParsedKey::Offset),
        LIMIT_KEY => return Ok(ParsedKey::Limit),
        _ => {}
    }

    for criterion in Criterion::ALL {
        if let Some(prefix) = key.strip_suffix(criterion.suffix()) {
            let properties = if prefix.is_empty() {
                schema.searchable_properties()?
            } else {
                split_properties(prefix)
            };
            return Ok(ParsedKey::Filter {
                criterion,
                properties,
            });
        }
    }

    Ok(ParsedKey::NotRecognized)
}

/// Parse a sort value; `None` means the value is malformed and no sort applies.
#[must_use]
pub fn parse_right_hand_side_for_sort(value: &str) -> Option<ParsedSortValue> {
    Direction::ALL.into_iter().find_map(|direction| {
        let list = value.strip_suffix(direction.suffix())?;
        if list.is_empty() {
            return None;
        }
        Some(ParsedSortValue {
            direction,
            properties: split_properties(list),
        })
    })
}
