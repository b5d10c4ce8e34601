//! Comparison operator vocabulary
//!
//! Fixed table of the operators a query-string key may carry and their
//! relational and document-store spellings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FilterError;

/// Comparison or membership operator of a filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
    ILike,
    NLike,
    NILike,
    Is,
    Not,
    In,
    Nin,
    /// Pre-built expression passed through verbatim; never parsed from a key
    Raw,
}

impl Method {
    /// Upper-case token as written in a query-string key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Lt => "LT",
            Self::Gte => "GTE",
            Self::Lte => "LTE",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::NLike => "NLIKE",
            Self::NILike => "NILIKE",
            Self::Is => "IS",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Nin => "NIN",
            Self::Raw => "RAW",
        }
    }

    /// Relational operator spelling, `None` for `Raw`
    pub fn sql_operator(&self) -> Option<&'static str> {
        let op = match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::NLike => "NOT LIKE",
            Self::NILike => "NOT ILIKE",
            Self::Is => "IS",
            Self::Not => "IS NOT",
            Self::In => "IN",
            Self::Nin => "NOT IN",
            Self::Raw => return None,
        };
        Some(op)
    }

    /// Document-store operator: the token lower-cased and `$`-prefixed
    pub fn document_operator(&self) -> String {
        format!("${}", self.as_str().to_lowercase())
    }

    pub fn is_like(&self) -> bool {
        matches!(self, Self::Like | Self::ILike | Self::NLike | Self::NILike)
    }

    pub fn is_membership(&self) -> bool {
        matches!(self, Self::In | Self::Nin)
    }

    pub fn is_null_check(&self) -> bool {
        matches!(self, Self::Is | Self::Not)
    }
}

impl FromStr for Method {
    type Err = FilterError;

    /// Parses an upper-case token; `RAW` is not accepted from input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQ" => Ok(Self::Eq),
            "NE" => Ok(Self::Ne),
            "GT" => Ok(Self::Gt),
            "LT" => Ok(Self::Lt),
            "GTE" => Ok(Self::Gte),
            "LTE" => Ok(Self::Lte),
            "LIKE" => Ok(Self::Like),
            "ILIKE" => Ok(Self::ILike),
            "NLIKE" => Ok(Self::NLike),
            "NILIKE" => Ok(Self::NILike),
            "IS" => Ok(Self::Is),
            "NOT" => Ok(Self::Not),
            "IN" => Ok(Self::In),
            "NIN" => Ok(Self::Nin),
            _ => Err(FilterError::unknown_method(s)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_operator_table() {
        let table = [
            (Method::Eq, "="),
            (Method::Ne, "<>"),
            (Method::Gt, ">"),
            (Method::Lt, "<"),
            (Method::Gte, ">="),
            (Method::Lte, "<="),
            (Method::Like, "LIKE"),
            (Method::NLike, "NOT LIKE"),
            (Method::ILike, "ILIKE"),
            (Method::NILike, "NOT ILIKE"),
            (Method::In, "IN"),
            (Method::Nin, "NOT IN"),
            (Method::Is, "IS"),
            (Method::Not, "IS NOT"),
        ];

        for (method, expected) in table {
            assert_eq!(method.sql_operator(), Some(expected));
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
        assert_eq!(Method::Raw.sql_operator(), None);
    }

    #[test]
    fn test_raw_is_not_parseable() {
        let err = "RAW".parse::<Method>().unwrap_err();
        assert_eq!(err, FilterError::unknown_method("RAW"));
    }

    #[test]
    fn test_unknown_token() {
        assert!("BETWEEN".parse::<Method>().is_err());
        // tokens are upper-cased by the key parser, not here
        assert!("eq".parse::<Method>().is_err());
    }

    #[test]
    fn test_document_operator() {
        assert_eq!(Method::Gte.document_operator(), "$gte");
        assert_eq!(Method::Nin.document_operator(), "$nin");
    }
}
