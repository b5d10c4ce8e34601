//! Relational rendering
//!
//! Produces a WHERE-clause fragment with `?` placeholders and the matching
//! positional arguments.

use super::method::Method;
use super::types::Filter;
use super::value::{FilterValue, Scalar};
use crate::error::{FilterError, FilterResult};
use crate::sql::{SqlDialect, rebind};

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SqlParams {
    pub values: Vec<Scalar>,
}

impl SqlParams {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `*` at either end of a LIKE pattern becomes `%`; interior `*` is kept
fn like_pattern(value: &str) -> String {
    let mut pattern = value.to_string();
    if pattern.len() >= 2 && pattern.starts_with('*') {
        pattern.replace_range(..1, "%");
    }
    if pattern.len() >= 2 && pattern.ends_with('*') {
        let end = pattern.len() - 1;
        pattern.replace_range(end.., "%");
    }
    pattern
}

impl Filter {
    /// WHERE-clause fragment for this filter
    pub fn where_clause(&self) -> FilterResult<String> {
        let name = self.name();
        let method = self.method();

        let clause = match (method, method.sql_operator()) {
            (Method::Raw, _) => name.to_string(),
            (Method::Is | Method::Not, Some(op)) => {
                if !self.value().is_null() {
                    return Err(FilterError::unknown_method(method.as_str()));
                }
                format!("{} {} NULL", name, op)
            }
            (Method::In | Method::Nin, Some(op)) => {
                let count = self.value().flatten().len();
                let placeholders = vec!["?"; count].join(",");
                format!("{} {} ({})", name, op, placeholders)
            }
            (_, Some(op)) => format!("{} {} ?", name, op),
            (_, None) => return Err(FilterError::unknown_method(method.as_str())),
        };

        tracing::trace!(field = name, %method, clause = %clause, "Rendered SQL clause");
        Ok(clause)
    }

    /// Positional arguments matching [`Filter::where_clause`]
    pub fn args(&self) -> FilterResult<Vec<Scalar>> {
        let method = self.method();
        match method {
            Method::Raw => Ok(Vec::new()),
            Method::Is | Method::Not => {
                if self.value().is_null() {
                    Ok(Vec::new())
                } else {
                    Err(FilterError::unknown_method(method.as_str()))
                }
            }
            Method::Like | Method::ILike | Method::NLike | Method::NILike => match self.value() {
                FilterValue::String(value) => Ok(vec![Scalar::String(like_pattern(value))]),
                _ => Err(FilterError::method_not_allowed(self.name(), method)),
            },
            _ => Ok(self.value().flatten()),
        }
    }

    /// Render the clause and append its arguments to `params`
    ///
    /// `params` is left untouched on error.
    pub fn to_sql(&self, params: &mut SqlParams) -> FilterResult<String> {
        let clause = self.where_clause()?;
        let args = self.args()?;
        params.values.extend(args);
        Ok(clause)
    }

    /// [`Filter::to_sql`] with placeholders numbered for `dialect`
    ///
    /// Numbering continues after the arguments already in `params`, so
    /// fragments can be joined as they are. Raw expressions are returned
    /// exactly as written.
    pub fn to_sql_with(
        &self,
        params: &mut SqlParams,
        dialect: &dyn SqlDialect,
    ) -> FilterResult<String> {
        let start = params.len() + 1;
        let clause = self.to_sql(params)?;
        if self.method() == Method::Raw {
            return Ok(clause);
        }
        let (clause, _) = rebind(&clause, dialect, start);
        Ok(clause)
    }
}
