//! Call-scoped parameters passed through `evaluate()` to metric hooks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Runtime parameters for a single evaluation call.
///
/// The kernel never reads these values itself; it hands the same context to
/// every metric hook involved in the call, so dialect-specific hooks can pick
/// up query-time parameters (partition dates, sample sizes, timeouts, ...).
///
/// # Examples
///
/// ```rust
/// use metric_guard::core::EvaluationContext;
///
/// let ctx = EvaluationContext::new()
///     .with("partition", "2024-01-31")
///     .with("sample_size", 1000);
///
/// assert_eq!(ctx.get_str("partition"), Some("2024-01-31"));
/// assert_eq!(ctx.get_i64("sample_size"), Some(1000));
/// assert!(ctx.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationContext {
    params: HashMap<String, Value>,
}

impl EvaluationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, consuming and returning the context.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.params.insert(key.into(), value.into())
    }

    /// Returns the raw value of a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Returns a string parameter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns an integer parameter.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Returns a floating point parameter.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterates over all parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for EvaluationContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
