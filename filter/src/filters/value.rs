//! Filter value model and coercion
//!
//! Raw value tokens are split on the list delimiter and converted into a
//! [`FilterValue`] whose shape matches the declared field type and the
//! operator's cardinality rules.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::method::Method;
use super::validation::FieldType;
use crate::core::constants::NULL_LITERAL;
use crate::error::{FilterError, FilterResult};

/// Document-store identity value (12 bytes, written as 24 hex characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ObjectId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Extended JSON: `{"$oid": "<hex>"}`
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$oid", &self.to_hex())?;
        map.end()
    }
}

/// A single positional argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Bool(bool),
    String(String),
    ObjectId(ObjectId),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::ObjectId(_) => "mongoid",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
            Self::ObjectId(v) => write!(f, "{}", v),
        }
    }
}

/// Coerced value of a filter
///
/// Serializes to the shape a document store expects: numbers, booleans,
/// strings, `{"$oid"}` objects, arrays of those, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// The `NULL` sentinel, only legal with `IS` / `NOT`
    Null,
    Int(i64),
    Bool(bool),
    String(String),
    ObjectId(ObjectId),
    IntList(Vec<i64>),
    StringList(Vec<String>),
    ObjectIdList(Vec<ObjectId>),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::IntList(_) | Self::StringList(_) | Self::ObjectIdList(_)
        )
    }

    /// Values as positional arguments, list elements in order
    pub fn flatten(&self) -> Vec<Scalar> {
        match self {
            Self::Null => Vec::new(),
            Self::Int(v) => vec![Scalar::Int(*v)],
            Self::Bool(v) => vec![Scalar::Bool(*v)],
            Self::String(v) => vec![Scalar::String(v.clone())],
            Self::ObjectId(v) => vec![Scalar::ObjectId(*v)],
            Self::IntList(list) => list.iter().copied().map(Scalar::Int).collect(),
            Self::StringList(list) => list.iter().cloned().map(Scalar::String).collect(),
            Self::ObjectIdList(list) => list.iter().copied().map(Scalar::ObjectId).collect(),
        }
    }
}

/// Convert a raw value token into a typed value for `method`
pub fn coerce(
    field: &str,
    raw: &str,
    delimiter: char,
    field_type: FieldType,
    method: Method,
) -> FilterResult<FilterValue> {
    let tokens: Vec<&str> = raw.split(delimiter).collect();

    tracing::trace!(
        field,
        value = raw,
        %delimiter,
        field_type = field_type.as_str(),
        tokens = tokens.len(),
        "Coercing filter value"
    );

    match field_type {
        FieldType::Int => coerce_int(field, &tokens, method),
        FieldType::Bool => coerce_bool(field, &tokens, method),
        FieldType::ObjectId => coerce_object_id(field, &tokens, method),
        FieldType::String => coerce_string(field, &tokens, method),
    }
}

fn parse_int(field: &str, token: &str) -> FilterResult<i64> {
    token
        .parse::<i64>()
        .map_err(|_| FilterError::bad_format(field, token))
}

fn parse_object_id(field: &str, token: &str) -> FilterResult<ObjectId> {
    token
        .parse::<ObjectId>()
        .map_err(|_| FilterError::bad_format(field, token))
}

/// Boolean lexing: `1 t T TRUE true True` and `0 f F FALSE false False`
fn parse_bool(field: &str, token: &str) -> FilterResult<bool> {
    match token {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(FilterError::bad_format(field, token)),
    }
}

fn coerce_int(field: &str, tokens: &[&str], method: Method) -> FilterResult<FilterValue> {
    if let [token] = tokens {
        return match method {
            Method::Eq
            | Method::Ne
            | Method::Gt
            | Method::Lt
            | Method::Gte
            | Method::Lte
            | Method::In
            | Method::Nin => Ok(FilterValue::Int(parse_int(field, token)?)),
            _ => Err(FilterError::method_not_allowed(field, method)),
        };
    }

    if !method.is_membership() {
        return Err(FilterError::method_not_allowed(field, method));
    }
    let list = tokens
        .iter()
        .map(|token| parse_int(field, token))
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(FilterValue::IntList(list))
}

fn coerce_bool(field: &str, tokens: &[&str], method: Method) -> FilterResult<FilterValue> {
    match tokens {
        [token] if method == Method::Eq => Ok(FilterValue::Bool(parse_bool(field, token)?)),
        _ => Err(FilterError::method_not_allowed(field, method)),
    }
}

fn coerce_object_id(field: &str, tokens: &[&str], method: Method) -> FilterResult<FilterValue> {
    if let [token] = tokens {
        if method != Method::Eq {
            return Err(FilterError::method_not_allowed(field, method));
        }
        return Ok(FilterValue::ObjectId(parse_object_id(field, token)?));
    }

    if !method.is_membership() {
        return Err(FilterError::method_not_allowed(field, method));
    }
    let list = tokens
        .iter()
        .map(|token| parse_object_id(field, token))
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(FilterValue::ObjectIdList(list))
}

fn coerce_string(field: &str, tokens: &[&str], method: Method) -> FilterResult<FilterValue> {
    if let [token] = tokens {
        return match method {
            Method::Is | Method::Not if token.eq_ignore_ascii_case(NULL_LITERAL) => {
                Ok(FilterValue::Null)
            }
            Method::Is | Method::Not | Method::Raw => {
                Err(FilterError::method_not_allowed(field, method))
            }
            _ => Ok(FilterValue::String(token.to_string())),
        };
    }

    if !method.is_membership() {
        return Err(FilterError::method_not_allowed(field, method));
    }
    Ok(FilterValue::StringList(
        tokens.iter().map(|token| token.to_string()).collect(),
    ))
}
