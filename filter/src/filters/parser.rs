//! Configured filter construction
//!
//! Binds a [`FilterConfig`] to a validation specification so callers can
//! build filters without repeating the delimiter and identity field.

use super::types::Filter;
use super::validation::Validations;
use crate::core::config::FilterConfig;
use crate::error::FilterResult;

/// Builds filters against one validation specification
#[derive(Debug, Clone)]
pub struct FilterParser {
    config: FilterConfig,
    validations: Validations,
}

impl FilterParser {
    pub fn new(config: FilterConfig, validations: Validations) -> FilterResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            validations,
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn validations(&self) -> &Validations {
        &self.validations
    }

    /// Build a filter from a key and a raw value
    pub fn parse(&self, key: &str, value: &str) -> FilterResult<Filter> {
        Filter::with_identity_field(
            key,
            value,
            self.config.delimiter,
            &self.validations,
            &self.config.identity_field,
        )
    }

    /// Build a filter from a `key=value` token
    ///
    /// Splits on the first `=`; a token without one has an empty value.
    pub fn parse_pair(&self, pair: &str) -> FilterResult<Filter> {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        self.parse(key, value)
    }
}
