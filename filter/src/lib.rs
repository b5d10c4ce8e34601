//! Typed query-string filters
//!
//! Parses `name[method]=value` query parameters into validated [`Filter`]s
//! and renders them as parameterized SQL clause fragments or MongoDB-style
//! document predicates.

pub mod app;
pub mod core;
pub mod error;
pub mod filters;
pub mod sql;

pub use error::{FilterError, FilterErrorKind, FilterResult, ValidationError};
pub use filters::{Filter, FilterParser, Method, OrState, SqlParams, Validations, Validator};
