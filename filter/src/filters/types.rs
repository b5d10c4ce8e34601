//! Filter type definitions
//!
//! A [`Filter`] is one typed, validated predicate built from a single
//! query-string `key=value` pair. It is immutable once constructed and can be
//! rendered any number of times (see the `sql` and `document` modules).

use serde::Serialize;

use super::key::parse_key;
use super::method::Method;
use super::validation::{FieldType, Validations};
use super::value::{FilterValue, coerce};
use crate::core::constants::DEFAULT_IDENTITY_FIELD;
use crate::error::{FilterError, FilterResult};

/// Position of a filter inside an OR group
///
/// Assigned and interpreted by the query orchestrator; filters only carry it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrState {
    #[default]
    None,
    GroupStart,
    InGroup,
    GroupEnd,
}

/// One resolved filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    key: String,
    name: String,
    method: Method,
    value: FilterValue,
    or_state: OrState,
}

impl Filter {
    /// Build a filter from a raw key and value
    ///
    /// `delimiter` separates list values (`id[in]=1,2,3`). Fields declared
    /// `mongoid` are renamed to `_id`.
    pub fn new(
        key: &str,
        value: &str,
        delimiter: char,
        validations: &Validations,
    ) -> FilterResult<Self> {
        Self::with_identity_field(key, value, delimiter, validations, DEFAULT_IDENTITY_FIELD)
    }

    /// Same as [`Filter::new`] with a custom identity field name
    pub fn with_identity_field(
        key: &str,
        value: &str,
        delimiter: char,
        validations: &Validations,
        identity_field: &str,
    ) -> FilterResult<Self> {
        if identity_field.is_empty() {
            return Err(FilterError::Config("identity field must not be empty".into()));
        }

        let (mut name, method) = parse_key(key)?;

        let validator = validations.validator_for(&name)?;
        let field_type = validations.type_of(&name);

        if field_type == FieldType::ObjectId {
            name = identity_field.to_string();
        }

        let value = coerce(&name, value, delimiter, field_type, method)?;

        if let Some(validator) = validator {
            validator.validate(&name, &value)?;
        }

        tracing::debug!(
            key,
            field = %name,
            method = %method,
            field_type = field_type.as_str(),
            "Parsed filter"
        );

        Ok(Self {
            key: key.to_string(),
            name,
            method,
            value,
            or_state: OrState::None,
        })
    }

    /// Pass a pre-built expression through unchanged
    ///
    /// Renders as the expression itself with no arguments. A blank
    /// expression is rejected.
    pub fn raw(expression: impl Into<String>) -> FilterResult<Self> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(FilterError::Config("raw expression must not be empty".into()));
        }
        Ok(Self {
            key: expression.clone(),
            name: expression,
            method: Method::Raw,
            value: FilterValue::Null,
            or_state: OrState::None,
        })
    }

    /// Copy of this filter tagged with an OR-group position
    pub fn with_or_state(self, or_state: OrState) -> Self {
        Self { or_state, ..self }
    }

    /// Original key token
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    pub fn or_state(&self) -> OrState {
        self.or_state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::error::{FilterErrorKind, ValidationError};
    use crate::filters::validation::Validator;
    use crate::filters::validators;

    fn declare(pairs: &[(&str, Option<Validator>)]) -> Validations {
        Validations::from_declarations(pairs.iter().map(|(k, v)| (*k, v.clone()))).unwrap()
    }

    #[test]
    fn test_int_list() {
        let validations = declare(&[("id:int", None)]);
        let filter = Filter::new("id[in]", "5,6,7", ',', &validations).unwrap();

        assert_eq!(filter.key(), "id[in]");
        assert_eq!(filter.name(), "id");
        assert_eq!(filter.method(), Method::In);
        assert_eq!(filter.value(), &FilterValue::IntList(vec![5, 6, 7]));
        assert_eq!(filter.or_state(), OrState::None);
    }

    #[test]
    fn test_undeclared_field() {
        let err = Filter::new("x[eq]", "5", ',', &Validations::new()).unwrap_err();
        assert_eq!(err.kind(), FilterErrorKind::ValidationNotFound);
    }

    #[test]
    fn test_empty_field_name_is_undeclared() {
        let validations = declare(&[("id:int", None)]);
        for key in ["[eq]", "[in]", ""] {
            let err = Filter::new(key, "1", ',', &validations).unwrap_err();
            assert_eq!(err, FilterError::validation_not_found(""));
        }
    }

    #[test]
    fn test_bool_list_not_allowed() {
        let validations = declare(&[("flag:bool", None)]);
        let err = Filter::new("flag[eq]", "1,2", ',', &validations).unwrap_err();
        assert_eq!(err.kind(), FilterErrorKind::MethodNotAllowed);
    }

    #[test]
    fn test_bad_int() {
        let validations = declare(&[("age:int", None)]);
        let err = Filter::new("age[gte]", "abc", ',', &validations).unwrap_err();
        assert_eq!(err.kind(), FilterErrorKind::BadFormat);
    }

    #[test]
    fn test_mongoid_renames_field() {
        let validations = declare(&[("user:mongoid", None)]);
        let filter = Filter::new("user", "64e9c6d61209c16ffaa3062e", ',', &validations).unwrap();
        assert_eq!(filter.name(), "_id");

        let filter = Filter::with_identity_field(
            "user",
            "64e9c6d61209c16ffaa3062e",
            ',',
            &validations,
            "uid",
        )
        .unwrap();
        assert_eq!(filter.name(), "uid");
    }

    #[test]
    fn test_empty_identity_field_rejected() {
        let validations = declare(&[("user:mongoid", None)]);
        let err = Filter::with_identity_field(
            "user",
            "64e9c6d61209c16ffaa3062e",
            ',',
            &validations,
            "",
        )
        .unwrap_err();
        assert_eq!(err.kind(), FilterErrorKind::Config);
    }

    #[test]
    fn test_null_skips_validator() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let validations = declare(&[(
            "active",
            Some(Validator::string(move |_| {
                flag.store(true, Ordering::SeqCst);
                Err(ValidationError::new("should not run"))
            })),
        )]);

        let filter = Filter::new("active[not]", "null", ',', &validations).unwrap();
        assert_eq!(filter.value(), &FilterValue::Null);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_validator_error_is_surfaced() {
        let validations = declare(&[("s", Some(validators::one_of(["one", "two"])))]);

        assert!(Filter::new("s[in]", "one,two", ',', &validations).is_ok());
        let err = Filter::new("s[in]", "one,three,four", ',', &validations).unwrap_err();
        assert_eq!(
            err,
            FilterError::Validation(ValidationError::new("three: not in scope"))
        );
    }

    #[test]
    fn test_raw_and_or_state() {
        let filter = Filter::raw("a = b")
            .unwrap()
            .with_or_state(OrState::GroupStart);
        assert_eq!(filter.name(), "a = b");
        assert_eq!(filter.method(), Method::Raw);
        assert_eq!(filter.or_state(), OrState::GroupStart);
    }

    #[test]
    fn test_blank_raw_rejected() {
        for expression in ["", "   "] {
            let err = Filter::raw(expression).unwrap_err();
            assert_eq!(err.kind(), FilterErrorKind::Config);
        }
    }
}
