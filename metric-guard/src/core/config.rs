//! Validation configuration and its dialect-specific interpretation.

use super::{DataSourceLanguageSupport, Threshold, ValidationFunction};
use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The user-facing configuration of a single validation.
///
/// Loading configuration files is left to the caller; this type only
/// describes the shape. The keys accepted by serde are `function` (or `on`),
/// `query`, `threshold`, `where`, `values` and `regex`.
///
/// # Examples
///
/// ```rust
/// use metric_guard::core::{Threshold, ValidationConfig, ValidationFunction};
///
/// let config: ValidationConfig = serde_json::from_str(
///     r#"{"on": "count_null", "threshold": {"lte": 0}, "where": "country = 'FR'"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.validation_function(), ValidationFunction::CountNull);
/// assert_eq!(config.threshold, Some(Threshold::new().with_lte(0.0)));
///
/// let built = ValidationConfig::builder(ValidationFunction::CountNull)
///     .threshold(Threshold::new().with_lte(0.0))
///     .where_clause("country = 'FR'")
///     .build();
/// assert_eq!(built, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// The metric this validation computes
    #[serde(alias = "on")]
    pub function: ValidationFunction,
    /// Query or expression payload for functions driven by custom queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Bounds the metric must satisfy; `None` reports the metric only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
    /// Row/document filter, interpreted according to the data source dialect
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    /// Discrete values used by valid/invalid value counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    /// Pattern used by regex based functions
    #[serde(default, rename = "regex", skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl ValidationConfig {
    /// Creates a configuration for `function` with every optional key unset.
    pub fn new(function: ValidationFunction) -> Self {
        Self {
            function,
            query: None,
            threshold: None,
            where_clause: None,
            values: None,
            regex: None,
        }
    }

    /// Starts a builder for a configuration of `function`.
    pub fn builder(function: ValidationFunction) -> ValidationConfigBuilder {
        ValidationConfigBuilder {
            config: Self::new(function),
        }
    }

    /// Returns the validation function tag.
    pub fn validation_function(&self) -> ValidationFunction {
        self.function
    }
}

/// Builder for [`ValidationConfig`].
#[derive(Debug, Clone)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Sets the query payload.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.config.query = Some(query.into());
        self
    }

    /// Sets the threshold.
    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.config.threshold = Some(threshold);
        self
    }

    /// Sets the `where` filter expression.
    pub fn where_clause(mut self, filter: impl Into<String>) -> Self {
        self.config.where_clause = Some(filter.into());
        self
    }

    /// Sets the list of discrete values.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.config.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the regex pattern.
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.config.regex = Some(pattern.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}

/// A `where` filter after dialect interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhereFilter {
    /// An opaque SQL boolean expression
    Sql(String),
    /// A structured search-DSL filter document
    Structured(Value),
}

impl WhereFilter {
    /// Returns the SQL expression, if this is a SQL filter.
    pub fn as_sql(&self) -> Option<&str> {
        match self {
            WhereFilter::Sql(expression) => Some(expression),
            WhereFilter::Structured(_) => None,
        }
    }

    /// Returns the structured document, if this is a search-DSL filter.
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            WhereFilter::Structured(document) => Some(document),
            WhereFilter::Sql(_) => None,
        }
    }
}

/// Interprets the configured `where` filter for the given dialect.
///
/// Structured dialects parse the filter as JSON and fail on malformed input;
/// unsupported dialects drop the filter.
pub(crate) fn interpret_where(
    filter: Option<&str>,
    dialect: DataSourceLanguageSupport,
) -> Result<Option<WhereFilter>> {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return Ok(None);
    };

    match dialect {
        DataSourceLanguageSupport::DslEs => serde_json::from_str(filter)
            .map(|document| Some(WhereFilter::Structured(document)))
            .map_err(|e| {
                GuardError::Configuration(format!("invalid structured where filter: {e}"))
            }),
        DataSourceLanguageSupport::Sql => Ok(Some(WhereFilter::Sql(filter.to_string()))),
        DataSourceLanguageSupport::Unsupported => Ok(None),
    }
}

/// Interprets the configured `values` list for the given dialect. Only SQL
/// dialects keep it.
pub(crate) fn interpret_values(
    values: Option<&[Value]>,
    dialect: DataSourceLanguageSupport,
) -> Option<Vec<Value>> {
    match (values, dialect) {
        (Some(values), DataSourceLanguageSupport::Sql) if !values.is_empty() => {
            Some(values.to_vec())
        }
        _ => None,
    }
}
