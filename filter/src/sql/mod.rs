//! SQL placeholder dialects
//!
//! Rebinds `?` placeholders for databases that number their parameters.

mod dialect;

use std::fmt;
use std::str::FromStr;

pub use dialect::{MysqlDialect, PostgresDialect, SqlDialect, SqliteDialect, rebind};

use crate::error::FilterError;

/// Database backend identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Sqlite,
    Mysql,
    Postgres,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::Mysql => &MysqlDialect,
            Backend::Postgres => &PostgresDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        self.dialect().name()
    }
}

impl FromStr for Backend {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "mysql" => Ok(Backend::Mysql),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            other => Err(FilterError::Config(format!("unknown backend: {}", other))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("postgresql".parse::<Backend>().unwrap(), Backend::Postgres);
        assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert!("oracle".parse::<Backend>().is_err());
        assert_eq!(Backend::Mysql.to_string(), "mysql");
    }
}
