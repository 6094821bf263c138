//! Error types for the metric-guard evaluation kernel.
//!
//! All fallible operations in this crate return [`GuardError`]. Errors raised by
//! metric hooks never cross the `evaluate()` boundary of a validation unit; they
//! are logged and turned into an absent result there. The remaining places that
//! surface a `GuardError` to callers are unit construction and the uncontained
//! `try_evaluate` entry points.

use thiserror::Error;

/// The main error type for the metric-guard crate.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A metric hook failed to produce a value.
    #[error("Metric computation failed for '{validation}': {message}")]
    MetricComputation {
        /// Name of the validation whose metric failed
        validation: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error reported by a data source while serving a metric request.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "postgres", "opensearch")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The validation configuration could not be interpreted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error when parsing a tag or expression.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error from serde_json.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error when an operation is not supported by a data source dialect.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a metric computation error for the named validation.
    pub fn metric_computation(validation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetricComputation {
            validation: validation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a metric computation error wrapping an underlying error.
    pub fn metric_computation_with_source(
        validation: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::MetricComputation {
            validation: validation.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns the messages of this error and every error in its source chain,
    /// outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }
        messages
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<GuardError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
            other => GuardError::Internal(format!("{msg}: {other}")),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            match e.into() {
                GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
                other => GuardError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}
