//! SQL dialect trait for placeholder rendering
//!
//! Filters always render `?` placeholders. Drivers that number their
//! parameters rebind the finished clause through a dialect.

/// SQL dialect trait for generating database-specific placeholders
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite/MySQL: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;
}

/// SQLite dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}

/// MySQL dialect
pub struct MysqlDialect;

impl SqlDialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}

/// PostgreSQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}

/// Rewrite every `?` in `clause` to the dialect's placeholder
///
/// Numbering starts at `start` (1-based); returns the rebound clause and the
/// next free index so consecutive fragments can be chained. The clause must
/// contain generated placeholders only; a `?` inside a literal is rewritten
/// too.
pub fn rebind(clause: &str, dialect: &dyn SqlDialect, start: usize) -> (String, usize) {
    let mut out = String::with_capacity(clause.len() + 8);
    let mut index = start;
    for c in clause.chars() {
        if c == '?' {
            out.push_str(&dialect.placeholder(index));
            index += 1;
        } else {
            out.push(c);
        }
    }
    (out, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_rebind() {
        let (sql, next) = rebind("a = ? AND b IN (?,?)", &PostgresDialect, 1);
        assert_eq!(sql, "a = $1 AND b IN ($2,$3)");
        assert_eq!(next, 4);

        let (sql, next) = rebind("c LIKE ?", &PostgresDialect, next);
        assert_eq!(sql, "c LIKE $4");
        assert_eq!(next, 5);
    }

    #[test]
    fn test_question_mark_dialects_are_identity() {
        for dialect in [&SqliteDialect as &dyn SqlDialect, &MysqlDialect] {
            let (sql, next) = rebind("id IN (?,?)", dialect, 1);
            assert_eq!(sql, "id IN (?,?)");
            assert_eq!(next, 3);
        }
    }

    #[test]
    fn test_no_placeholders() {
        let (sql, next) = rebind("active IS NULL", &PostgresDialect, 7);
        assert_eq!(sql, "active IS NULL");
        assert_eq!(next, 7);
    }
}
