//! # Search Errors
//!
//! Every failure a search can produce is a [`SearchError`]. Variants fall into
//! three groups:
//!
//! - **Validation**: the request references something the model does not allow
//!   (unknown or non-searchable property, bare criterion on a model without
//!   searchable properties, non-numeric bounds, oversized values).
//! - **Construction**: the model name is unknown to the schema registry.
//! - **Store**: an opaque [`DbErr`] passed through from the store unchanged.
//!
//! Store errors are logged with `tracing` and never sent to clients; the HTTP
//! response only carries a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

/// Errors raised while translating or executing a search
#[derive(Debug)]
pub enum SearchError {
    /// The schema registry has no model with this name
    UnknownModel {
        /// Requested model name
        model: String,
    },

    /// A criterion or sort value names a property the model does not declare
    UnknownProperty {
        /// Model being searched
        model: String,
        /// Offending property name
        property: String,
    },

    /// The property exists but is not flagged searchable
    NotSearchable {
        /// Model being searched
        model: String,
        /// Offending property name
        property: String,
    },

    /// A bare criterion (`*has`, `*is`, ...) was used on a model with no searchable properties
    NoSearchableProperties {
        /// Model being searched
        model: String,
    },

    /// A range bound, `limit` or `offset` could not be read as a number
    InvalidNumber {
        /// Parameter key carrying the value
        key: String,
        /// Raw value as received
        value: String,
    },

    /// A filter value exceeds the configured maximum length
    ValueTooLong {
        /// Parameter key carrying the value
        key: String,
        /// Length of the received value
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// Failure reported by the store (details logged, not exposed)
    Store(DbErr),
}

impl SearchError {
    pub fn unknown_model(model: impl Into<String>) -> Self {
        Self::UnknownModel {
            model: model.into(),
        }
    }

    pub fn unknown_property(model: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            model: model.into(),
            property: property.into(),
        }
    }

    pub fn not_searchable(model: impl Into<String>, property: impl Into<String>) -> Self {
        Self::NotSearchable {
            model: model.into(),
            property: property.into(),
        }
    }

    pub fn no_searchable_properties(model: impl Into<String>) -> Self {
        Self::NoSearchableProperties {
            model: model.into(),
        }
    }

    pub fn invalid_number(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            key: key.into(),
            value: value.into(),
        }
    }

    /// True for errors caused by the request itself rather than by configuration or the store
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownProperty { .. }
                | Self::NotSearchable { .. }
                | Self::NoSearchableProperties { .. }
                | Self::InvalidNumber { .. }
                | Self::ValueTooLong { .. }
        )
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownProperty { .. }
            | Self::NotSearchable { .. }
            | Self::NoSearchableProperties { .. }
            | Self::InvalidNumber { .. }
            | Self::ValueTooLong { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownModel { .. } | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Sanitized, user-facing message
    fn user_message(&self) -> String {
        match self {
            Self::UnknownModel { model } => format!("No such model '{model}'"),
            Self::UnknownProperty { model, property } => {
                format!("Property '{property}' does not exist on model '{model}'")
            }
            Self::NotSearchable { model, property } => {
                format!("Property '{property}' of model '{model}' is not searchable")
            }
            Self::NoSearchableProperties { model } => {
                format!("Model '{model}' has no searchable properties")
            }
            Self::InvalidNumber { key, value } => {
                format!("Parameter '{key}' expects a number, got '{value}'")
            }
            Self::ValueTooLong { key, length, max } => {
                format!("Parameter '{key}' is {length} characters long, the maximum is {max}")
            }
            Self::Store(_) => "A database error occurred".to_string(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Store(internal) => {
                tracing::error!(error = ?internal, "Store error during search");
            }
            Self::UnknownModel { model } => {
                tracing::error!(model = %model, "Search bound to an unknown model");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Rejected search request"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn from_error(err: &SearchError) -> Self {
        let details = match err {
            SearchError::UnknownProperty { property, .. }
            | SearchError::NotSearchable { property, .. } => {
                Some(serde_json::json!({ "property": property }))
            }
            SearchError::InvalidNumber { key, .. } | SearchError::ValueTooLong { key, .. } => {
                Some(serde_json::json!({ "parameter": key }))
            }
            _ => None,
        };
        Self {
            error: err.user_message(),
            details,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        self.log_internal();
        let status = self.status_code();
        (status, Json(ErrorResponse::from_error(&self))).into_response()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Display is for logs, so the store's own message is kept here
            Self::Store(internal) => write!(f, "Store error: {internal}"),
            _ => write!(f, "{}", self.user_message()),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(internal) => Some(internal),
            _ => None,
        }
    }
}

impl From<DbErr> for SearchError {
    fn from(err: DbErr) -> Self {
        Self::Store(err)
    }
}
