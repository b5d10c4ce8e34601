//! Error types for filter construction and rendering
//!
//! Every failure is a caller-input error: construction is all-or-nothing and
//! rendering never mutates the filter, so nothing here is retried.

use std::fmt;

use thiserror::Error;

/// Error returned by a user-supplied validator
///
/// The message is surfaced to the caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error category, for callers that map errors onto HTTP statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterErrorKind {
    ValidationNotFound,
    UnknownMethod,
    BadFormat,
    MethodNotAllowed,
    Validation,
    Config,
}

impl fmt::Display for FilterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationNotFound => write!(f, "VALIDATION_NOT_FOUND"),
            Self::UnknownMethod => write!(f, "UNKNOWN_METHOD"),
            Self::BadFormat => write!(f, "BAD_FORMAT"),
            Self::MethodNotAllowed => write!(f, "METHOD_NOT_ALLOWED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Config => write!(f, "CONFIG"),
        }
    }
}

/// Unified error type for the filter engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Field referenced in the query has no declarator
    #[error("validation not found for field: {field}")]
    ValidationNotFound { field: String },

    /// Operator token outside the vocabulary, or structurally invalid when rendering
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// Value token cannot be parsed into the declared type
    #[error("bad format for field {field}: {value:?}")]
    BadFormat { field: String, value: String },

    /// Operator, cardinality and type do not fit together
    #[error("method {method} not allowed for field {field}")]
    MethodNotAllowed { field: String, method: String },

    /// Error raised by a user validator
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Validator scalar kind does not match the declared field type
    #[error("validator for {field} expects {validator} values, field is declared {declared}")]
    ValidatorTypeMismatch {
        field: String,
        declared: &'static str,
        validator: &'static str,
    },

    /// Invalid validation specification or configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl FilterError {
    pub fn validation_not_found(field: impl Into<String>) -> Self {
        Self::ValidationNotFound {
            field: field.into(),
        }
    }

    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod(method.into())
    }

    pub fn bad_format(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::BadFormat {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn method_not_allowed(field: impl Into<String>, method: impl fmt::Display) -> Self {
        Self::MethodNotAllowed {
            field: field.into(),
            method: method.to_string(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> FilterErrorKind {
        match self {
            Self::ValidationNotFound { .. } => FilterErrorKind::ValidationNotFound,
            Self::UnknownMethod(_) => FilterErrorKind::UnknownMethod,
            Self::BadFormat { .. } => FilterErrorKind::BadFormat,
            Self::MethodNotAllowed { .. } => FilterErrorKind::MethodNotAllowed,
            Self::Validation(_) => FilterErrorKind::Validation,
            Self::ValidatorTypeMismatch { .. } | Self::Config(_) => FilterErrorKind::Config,
        }
    }
}

/// Result alias used across the crate
pub type FilterResult<T> = Result<T, FilterError>;
