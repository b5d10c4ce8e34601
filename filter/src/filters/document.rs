//! Document-store rendering
//!
//! Produces a MongoDB-style predicate for the filter's field, as JSON in
//! query syntax (identity values in extended JSON).

use serde_json::{Map, Value, json};

use super::method::Method;
use super::types::Filter;
use super::value::FilterValue;
use crate::error::{FilterError, FilterResult};

/// Anchor a LIKE pattern as a regex
///
/// A leading `*` leaves the start unanchored, otherwise `^` is prepended; a
/// trailing `*` leaves the end unanchored, otherwise `$` is appended.
/// Interior `*` and regex metacharacters pass through unchanged.
fn regex_pattern(value: &str) -> String {
    let mut pattern = match value.strip_prefix('*') {
        Some(rest) => rest.to_string(),
        None => format!("^{}", value),
    };
    if pattern.ends_with('*') {
        pattern.pop();
    } else {
        pattern.push('$');
    }
    pattern
}

impl Filter {
    /// Document-store predicate for this filter's field
    pub fn to_document(&self) -> FilterResult<Value> {
        let method = self.method();
        let value = self.value();

        let predicate = match method {
            Method::Eq => to_json(value)?,
            Method::Ne | Method::Gt | Method::Lt | Method::Gte | Method::Lte => {
                single(method.document_operator(), to_json(value)?)
            }
            Method::Like | Method::ILike | Method::NLike | Method::NILike => {
                let FilterValue::String(pattern) = value else {
                    return Err(FilterError::method_not_allowed(self.name(), method));
                };

                let mut regex = Map::new();
                regex.insert("$regex".to_string(), Value::String(regex_pattern(pattern)));
                if matches!(method, Method::ILike | Method::NILike) {
                    regex.insert("$options".to_string(), Value::String("i".to_string()));
                }

                if matches!(method, Method::NLike | Method::NILike) {
                    json!({ "$not": regex })
                } else {
                    Value::Object(regex)
                }
            }
            Method::Not | Method::Is => {
                if !value.is_null() {
                    return Err(FilterError::method_not_allowed(self.name(), method));
                }
                json!({ "$exists": method == Method::Not })
            }
            Method::In | Method::Nin => {
                let args = serde_json::to_value(self.args()?).map_err(json_error)?;
                single(method.document_operator(), args)
            }
            Method::Raw => return Err(FilterError::unknown_method(method.as_str())),
        };

        tracing::trace!(field = self.name(), %method, "Rendered document predicate");
        Ok(predicate)
    }

    /// `(field, predicate)` pair for assembling a document filter
    pub fn document_entry(&self) -> FilterResult<(String, Value)> {
        Ok((self.name().to_string(), self.to_document()?))
    }
}

fn single(operator: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(operator, value);
    Value::Object(map)
}

fn to_json(value: &FilterValue) -> FilterResult<Value> {
    serde_json::to_value(value).map_err(json_error)
}

fn json_error(err: serde_json::Error) -> FilterError {
    FilterError::Config(format!("cannot encode filter value: {}", err))
}
