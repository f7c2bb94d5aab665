//! # Query-String Filtering
//!
//! Translates query-string pairs into a parameterized predicate, an ORDER BY
//! clause and pagination bounds.
//!
//! ## Parameter Grammar
//!
//! ```text
//! key        := "sort" | "limit" | "offset" | propertylist? criterion
//! criterion  := "*min" | "*max" | "*has" | "*is"
//! propertylist := property ("*" property)*
//! sort-value := propertylist "*asc" | propertylist "*desc"
//! ```
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Substring match on one property
//! GET /articles?title*has=rust
//!
//! // Same value on several properties, combined with OR
//! GET /articles?description*title*has=rust
//!
//! // Every searchable property
//! GET /articles?*has=rust
//!
//! // Numeric range, each parameter is its own AND-ed group
//! GET /articles?views*min=10&views*max=100
//!
//! // Sorting accumulates across repeated keys
//! GET /articles?sort=published*desc&sort=title*asc
//!
//! // Pagination
//! GET /articles?limit=10&offset=20
//! ```
//!
//! Keys outside the grammar never filter anything but are still echoed back
//! in the rebuilt query string.

pub mod conditions;
pub mod fragments;
pub mod parse;

pub use conditions::{BoundValue, Bindings, SearchQuery, SearchRequest};
pub use fragments::EchoFragments;
pub use parse::{
    Criterion, Direction, ParsedKey, ParsedSortValue, SEPARATOR, parse_left_hand_side,
    parse_right_hand_side_for_sort,
};
