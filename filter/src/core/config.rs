use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_DELIMITER, DEFAULT_IDENTITY_FIELD, ENV_DELIMITER, ENV_IDENTITY_FIELD,
    RESERVED_DELIMITERS,
};
use crate::error::{FilterError, FilterResult};

/// Filter parsing settings
///
/// Loaded from a JSON file or built from defaults, then optionally
/// overridden from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Separator of list values
    pub delimiter: char,
    /// Field name that `mongoid` declarations are rewritten to
    pub identity_field: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
        }
    }
}

impl FilterConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> FilterResult<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FilterError::Config(format!("invalid filter config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_file(path: &Path) -> FilterResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FilterError::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Apply overrides from a variable lookup (`RQP_DELIMITER`, `RQP_IDENTITY_FIELD`)
    pub fn with_overrides<F>(mut self, lookup: F) -> FilterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DELIMITER) {
            let mut chars = raw.chars();
            self.delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(FilterError::Config(format!(
                        "{} must be a single character, got {:?}",
                        ENV_DELIMITER, raw
                    )));
                }
            };
        }
        if let Some(field) = lookup(ENV_IDENTITY_FIELD) {
            self.identity_field = field;
        }

        self.validate()?;
        tracing::debug!(
            delimiter = %self.delimiter,
            identity_field = %self.identity_field,
            "Filter config loaded"
        );
        Ok(self)
    }

    pub fn validate(&self) -> FilterResult<()> {
        if RESERVED_DELIMITERS.contains(&self.delimiter) {
            return Err(FilterError::Config(format!(
                "delimiter {:?} is reserved",
                self.delimiter
            )));
        }
        if self.identity_field.is_empty() {
            return Err(FilterError::Config(
                "identity field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.identity_field, "_id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = FilterConfig::default()
            .with_overrides(lookup(&[(ENV_DELIMITER, "|"), (ENV_IDENTITY_FIELD, "uid")]))
            .unwrap();
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.identity_field, "uid");
    }

    #[test]
    fn test_override_rejects_long_delimiter() {
        let err = FilterConfig::default()
            .with_overrides(lookup(&[(ENV_DELIMITER, ";;")]))
            .unwrap_err();
        assert!(matches!(err, FilterError::Config(_)));
    }

    #[test]
    fn test_json_partial_document_uses_defaults() {
        let config = FilterConfig::from_json_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.identity_field, "_id");

        assert!(FilterConfig::from_json_str(r#"{"identity_field": ""}"#).is_err());
        assert!(FilterConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rqp.json");
        fs::write(&path, r#"{"delimiter": "|", "identity_field": "oid"}"#).unwrap();

        let config = FilterConfig::from_file(&path).unwrap();
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.identity_field, "oid");

        assert!(FilterConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
