//! Validation specification
//!
//! Callers declare every filterable field with a declarator string,
//! `"field"` or `"field:type"`, optionally paired with a typed validator.
//! Declarators are parsed once when the specification is built; filter
//! construction then resolves the field's type and validator from it.

use std::fmt;
use std::sync::Arc;

use super::value::{FilterValue, ObjectId, Scalar};
use crate::error::{FilterError, FilterResult, ValidationError};

/// Declared value type of a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldType {
    Int,
    Bool,
    /// Document-store identity; the field name is rewritten to the identity field
    ObjectId,
    #[default]
    String,
}

impl FieldType {
    /// Parse a declarator type suffix; unknown suffixes fall back to `String`
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "int" | "i" => Self::Int,
            "bool" | "b" => Self::Bool,
            "mongoid" => Self::ObjectId,
            _ => Self::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::ObjectId => "mongoid",
            Self::String => "string",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type Check<T> = Arc<dyn Fn(T) -> Result<(), ValidationError> + Send + Sync>;
type StrCheck = Arc<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Typed validator applied to each coerced value
#[derive(Clone)]
pub enum Validator {
    Int(Check<i64>),
    Bool(Check<bool>),
    Str(StrCheck),
    ObjectId(Check<ObjectId>),
}

impl Validator {
    pub fn int<F>(f: F) -> Self
    where
        F: Fn(i64) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::Int(Arc::new(f))
    }

    pub fn bool<F>(f: F) -> Self
    where
        F: Fn(bool) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::Bool(Arc::new(f))
    }

    pub fn string<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::Str(Arc::new(f))
    }

    pub fn object_id<F>(f: F) -> Self
    where
        F: Fn(ObjectId) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::ObjectId(Arc::new(f))
    }

    /// Field type this validator accepts
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Int(_) => FieldType::Int,
            Self::Bool(_) => FieldType::Bool,
            Self::Str(_) => FieldType::String,
            Self::ObjectId(_) => FieldType::ObjectId,
        }
    }

    /// Run the check against a single scalar
    pub fn check(&self, field: &str, value: &Scalar) -> FilterResult<()> {
        let result = match (self, value) {
            (Self::Int(f), Scalar::Int(v)) => f(*v),
            (Self::Bool(f), Scalar::Bool(v)) => f(*v),
            (Self::Str(f), Scalar::String(v)) => f(v),
            (Self::ObjectId(f), Scalar::ObjectId(v)) => f(*v),
            _ => {
                return Err(FilterError::ValidatorTypeMismatch {
                    field: field.to_string(),
                    declared: value.type_name(),
                    validator: self.field_type().as_str(),
                });
            }
        };
        result.map_err(FilterError::from)
    }

    /// Run the check against a coerced value
    ///
    /// The `NULL` sentinel is exempt. Lists are checked element by element
    /// and the first failure is returned.
    pub fn validate(&self, field: &str, value: &FilterValue) -> FilterResult<()> {
        if value.is_null() {
            return Ok(());
        }
        value
            .flatten()
            .iter()
            .try_for_each(|scalar| self.check(field, scalar))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator<{}>", self.field_type())
    }
}

/// One parsed entry of the validation specification
#[derive(Debug, Clone)]
pub struct Declarator {
    pub field: String,
    pub field_type: FieldType,
    /// Whether the declarator carried a `:type` suffix
    pub explicit_type: bool,
    pub validator: Option<Validator>,
}

impl Declarator {
    /// Parse `"field"` or `"field:type"`
    ///
    /// Only the segment after the first `:` names the type; further tags
    /// (`"limit:int:required"`) are ignored.
    pub fn parse(spec: &str, validator: Option<Validator>) -> FilterResult<Self> {
        let mut segments = spec.split(':');
        let field = segments.next().unwrap_or_default();
        let suffix = segments.next();

        if field.is_empty() {
            return Err(FilterError::Config(format!(
                "declarator {:?} has an empty field name",
                spec
            )));
        }

        let field_type = suffix.map(FieldType::from_suffix).unwrap_or_default();

        if let Some(validator) = &validator {
            if validator.field_type() != field_type {
                return Err(FilterError::ValidatorTypeMismatch {
                    field: field.to_string(),
                    declared: field_type.as_str(),
                    validator: validator.field_type().as_str(),
                });
            }
        }

        Ok(Self {
            field: field.to_string(),
            field_type,
            explicit_type: suffix.is_some(),
            validator,
        })
    }
}

/// Ordered set of declarators
///
/// Lookups return the first matching declarator in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Validations {
    declarators: Vec<Declarator>,
}

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(declarator, validator)` pairs
    pub fn from_declarations<'a, I>(declarations: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = (&'a str, Option<Validator>)>,
    {
        declarations
            .into_iter()
            .try_fold(Self::new(), |validations, (spec, validator)| {
                validations.declare(spec, validator)
            })
    }

    /// Add a declarator
    pub fn declare(mut self, spec: &str, validator: Option<Validator>) -> FilterResult<Self> {
        self.declarators.push(Declarator::parse(spec, validator)?);
        Ok(self)
    }

    pub fn declarators(&self) -> &[Declarator] {
        &self.declarators
    }

    pub fn is_empty(&self) -> bool {
        self.declarators.is_empty()
    }

    /// Validator of the first declarator naming `name`
    ///
    /// Fails with `ValidationNotFound` when the field is not declared at all,
    /// even if a declaration would carry no validator.
    pub fn validator_for(&self, name: &str) -> FilterResult<Option<&Validator>> {
        self.declarators
            .iter()
            .find(|d| d.field == name)
            .map(|d| d.validator.as_ref())
            .ok_or_else(|| FilterError::validation_not_found(name))
    }

    /// Declared type of `name`
    ///
    /// Only declarators with an explicit `:type` suffix contribute; a field
    /// declared without one is a string.
    pub fn type_of(&self, name: &str) -> FieldType {
        self.declarators
            .iter()
            .find(|d| d.explicit_type && d.field == name)
            .map(|d| d.field_type)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_suffixes() {
        assert_eq!(FieldType::from_suffix("int"), FieldType::Int);
        assert_eq!(FieldType::from_suffix("i"), FieldType::Int);
        assert_eq!(FieldType::from_suffix("bool"), FieldType::Bool);
        assert_eq!(FieldType::from_suffix("b"), FieldType::Bool);
        assert_eq!(FieldType::from_suffix("mongoid"), FieldType::ObjectId);
        assert_eq!(FieldType::from_suffix("required"), FieldType::String);
    }

    #[test]
    fn test_extra_tags_do_not_change_type() {
        let validations = Validations::from_declarations([
            ("id:int:required", None),
            ("flag:b:", None),
            ("limit:required", None),
        ])
        .unwrap();

        assert_eq!(validations.type_of("id"), FieldType::Int);
        assert_eq!(validations.type_of("flag"), FieldType::Bool);
        assert_eq!(validations.type_of("limit"), FieldType::String);
        assert!(validations.validator_for("limit").unwrap().is_none());
    }

    #[test]
    fn test_lookup_requires_declaration() {
        let validations = Validations::new().declare("id:int", None).unwrap();

        assert!(validations.validator_for("id").unwrap().is_none());
        assert_eq!(
            validations.validator_for("x").unwrap_err(),
            FilterError::validation_not_found("x")
        );
        assert_eq!(validations.type_of("id"), FieldType::Int);
        assert_eq!(validations.type_of("x"), FieldType::String);
    }

    #[test]
    fn test_type_lookup_prefers_explicit_declarator() {
        let validations = Validations::from_declarations([
            ("id", Some(Validator::string(|_| Ok(())))),
            ("id:int", None),
        ])
        .unwrap();

        // first match wins for the validator, explicit suffix wins for the type
        assert!(validations.validator_for("id").unwrap().is_some());
        assert_eq!(validations.type_of("id"), FieldType::Int);
    }

    #[test]
    fn test_rejects_empty_field() {
        let err = Validations::new().declare(":int", None).unwrap_err();
        assert!(matches!(err, FilterError::Config(_)));
    }

    #[test]
    fn test_rejects_mismatched_validator() {
        let err = Validations::new()
            .declare("age:int", Some(Validator::string(|_| Ok(()))))
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::ValidatorTypeMismatch {
                field: "age".to_string(),
                declared: "int",
                validator: "string",
            }
        );
    }

    #[test]
    fn test_validate_list_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = Validator::int(move |v| {
            counter.fetch_add(1, Ordering::SeqCst);
            if v > 5 {
                Err(ValidationError::new(format!("{} is too big", v)))
            } else {
                Ok(())
            }
        });

        let err = validator
            .validate("id", &FilterValue::IntList(vec![1, 6, 7]))
            .unwrap_err();
        assert_eq!(err.to_string(), "6 is too big");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_skips_null() {
        let validator = Validator::string(|_| Err(ValidationError::new("never")));
        assert!(validator.validate("active", &FilterValue::Null).is_ok());
        assert!(
            validator
                .validate("active", &FilterValue::String("x".into()))
                .is_err()
        );
    }
}
