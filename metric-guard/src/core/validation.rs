//! Single-source validation units.
//!
//! A [`Validation`] pairs an immutable [`ValidationDefinition`] with a
//! [`MetricGenerator`] that knows how to compute the configured metric for one
//! data-source dialect. Calling [`Validation::evaluate`] computes the metric,
//! applies the threshold and returns a [`ValidationInfo`]; any failure along
//! the way is logged and turned into `None` so that a batch of validations
//! keeps going.

use super::config::{interpret_values, interpret_where};
use super::{
    DataSource, EvaluationContext, Threshold, ValidationConfig, ValidationFunction,
    ValidationIdentity, ValidationInfo, ValidationRecord, WhereFilter,
};
use crate::error::{GuardError, Result};
use crate::logging::truncate_field;
use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Longest query or filter text copied into a diagnostic log entry.
const MAX_LOGGED_PAYLOAD: usize = 512;

/// The configuration-derived state of a validation.
///
/// The `where` filter and `values` list are interpreted once, here, according
/// to the dialect of the data source:
///
/// | dialect       | `where`                         | `values`    |
/// |---------------|---------------------------------|-------------|
/// | `Sql`         | kept as an opaque expression    | kept        |
/// | `DslEs`       | parsed into a JSON document     | dropped     |
/// | `Unsupported` | dropped                         | dropped     |
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use metric_guard::core::{
///     DataSource, DataSourceLanguageSupport, ValidationConfig, ValidationDefinition,
///     ValidationFunction,
/// };
///
/// #[derive(Debug)]
/// struct Warehouse;
///
/// impl DataSource for Warehouse {
///     fn data_source_name(&self) -> &str { "warehouse" }
///     fn language_support(&self) -> DataSourceLanguageSupport { DataSourceLanguageSupport::Sql }
/// }
///
/// let config = ValidationConfig::builder(ValidationFunction::CountNull)
///     .where_clause("country = 'FR'")
///     .build();
/// let definition = ValidationDefinition::new("email_nulls", config, Arc::new(Warehouse), "users")
///     .unwrap()
///     .with_field_name("email");
///
/// assert_eq!(definition.validation_identity(), "warehouse.users.email.count_null.email_nulls");
/// assert_eq!(definition.where_filter().and_then(|f| f.as_sql()), Some("country = 'FR'"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationDefinition {
    name: String,
    config: ValidationConfig,
    data_source: Arc<dyn DataSource>,
    dataset_name: String,
    field_name: Option<String>,
    query: Option<String>,
    threshold: Option<Threshold>,
    where_filter: Option<WhereFilter>,
    values: Option<Vec<Value>>,
    regex_pattern: Option<String>,
}

impl ValidationDefinition {
    /// Creates a definition for a validation over `dataset_name`.
    ///
    /// Fails only when the data source speaks the structured search dialect
    /// and the configured `where` filter is not valid JSON. An unsupported
    /// dialect never fails; the filter and values are simply left unset.
    pub fn new(
        name: impl Into<String>,
        config: ValidationConfig,
        data_source: Arc<dyn DataSource>,
        dataset_name: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let dialect = data_source.language_support();

        let where_filter = interpret_where(config.where_clause.as_deref(), dialect).map_err(
            |e| GuardError::Configuration(format!("validation '{name}': {e}")),
        )?;
        let values = interpret_values(config.values.as_deref(), dialect);

        if where_filter.is_none() && config.where_clause.is_some() {
            debug!(
                validation.name = %name,
                data_source.name = %data_source.data_source_name(),
                data_source.dialect = %dialect,
                "Ignoring where filter for dialect"
            );
        }

        Ok(Self {
            query: config.query.clone(),
            threshold: config.threshold,
            regex_pattern: config.regex.clone(),
            where_filter,
            values,
            name,
            config,
            data_source,
            dataset_name: dataset_name.into(),
            field_name: None,
        })
    }

    /// Scopes the validation to a single field.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Returns the validation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration this definition was built from.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Returns the validation function tag.
    pub fn validation_function(&self) -> ValidationFunction {
        self.config.validation_function()
    }

    /// Returns the data source handle.
    pub fn data_source(&self) -> &Arc<dyn DataSource> {
        &self.data_source
    }

    /// Returns the data source name.
    pub fn data_source_name(&self) -> &str {
        self.data_source.data_source_name()
    }

    /// Returns the dataset name.
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    /// Returns the field name, if the validation is field scoped.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Returns the query payload.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the threshold, if configured.
    pub fn threshold(&self) -> Option<&Threshold> {
        self.threshold.as_ref()
    }

    /// Returns the dialect-interpreted `where` filter.
    pub fn where_filter(&self) -> Option<&WhereFilter> {
        self.where_filter.as_ref()
    }

    /// Returns the dialect-interpreted `values` list.
    pub fn values(&self) -> Option<&[Value]> {
        self.values.as_deref()
    }

    /// Returns the regex pattern.
    pub fn regex_pattern(&self) -> Option<&str> {
        self.regex_pattern.as_deref()
    }

    /// Returns the stable identity of this validation.
    pub fn validation_identity(&self) -> String {
        ValidationIdentity::generate_identity(
            self.validation_function(),
            &self.name,
            Some(self.data_source_name()),
            Some(&self.dataset_name),
            self.field_name.as_deref(),
        )
    }

    /// Checks a metric value against the configured threshold.
    ///
    /// Without a threshold every value passes.
    pub fn validate_threshold(&self, metric_value: f64) -> (bool, Option<String>) {
        match &self.threshold {
            Some(threshold) => threshold.validate(metric_value),
            None => (true, None),
        }
    }

    /// Assembles a record for `value`, attaching a verdict if a threshold is
    /// configured.
    pub(crate) fn build_info(&self, value: f64) -> ValidationInfo {
        let mut info = ValidationInfo {
            name: self.name.clone(),
            identity: self.validation_identity(),
            data_source_name: self.data_source_name().to_string(),
            dataset: self.dataset_name.clone(),
            validation_function: self.validation_function(),
            field: self.field_name.clone(),
            value,
            timestamp: chrono::Utc::now(),
            tags: HashMap::from([("name".to_string(), self.name.clone())]),
            is_valid: None,
            reason: None,
        };
        if let Some(threshold) = &self.threshold {
            info.apply_verdict(threshold.validate(value));
        }
        info
    }

    /// Runs `evaluation`, converting any error or panic into `None` after
    /// logging it.
    pub(crate) async fn contain<T, F>(&self, evaluation: F) -> Option<T>
    where
        F: Future<Output = Result<T>> + Send,
    {
        let err = match AssertUnwindSafe(evaluation).catch_unwind().await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(err)) => err,
            Err(panic) => GuardError::Internal(format!(
                "metric hook panicked: {}",
                panic_message(panic.as_ref())
            )),
        };
        self.report_failure(&err);
        None
    }

    fn report_failure(&self, err: &GuardError) {
        let name = &self.name;
        error!(
            validation.name = %name,
            validation.identity = %self.validation_identity(),
            validation.function = %self.validation_function(),
            validation.dataset = %self.dataset_name,
            validation.query = ?self.query.as_deref().map(|q| truncate_field(q, MAX_LOGGED_PAYLOAD)),
            error.message = %err,
            error.chain = ?err.chain(),
            error.backtrace = %Backtrace::force_capture(),
            "Failed to generate metric {name}: {err}"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

/// Computes the metric of a validation for one data-source dialect.
///
/// Implementations build and run whatever request the dialect needs (a SQL
/// query, a search count, ...) using the definition's dataset, field, filter,
/// values, regex and query payload, plus any call-scoped parameters from the
/// context. Returning an error is the normal way to signal failure; the
/// validation logs it and reports no result.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use metric_guard::core::{EvaluationContext, MetricGenerator, ValidationDefinition};
/// use metric_guard::error::Result;
///
/// #[derive(Debug)]
/// struct FixedRowCount(f64);
///
/// #[async_trait]
/// impl MetricGenerator for FixedRowCount {
///     async fn generate_metric_value(
///         &self,
///         _validation: &ValidationDefinition,
///         _ctx: &EvaluationContext,
///     ) -> Result<f64> {
///         Ok(self.0)
///     }
/// }
/// ```
#[async_trait]
pub trait MetricGenerator: Debug + Send + Sync {
    /// Computes the metric value for `validation`.
    async fn generate_metric_value(
        &self,
        validation: &ValidationDefinition,
        ctx: &EvaluationContext,
    ) -> Result<f64>;
}

/// A validation over a single data source.
#[derive(Debug, Clone)]
pub struct Validation {
    definition: ValidationDefinition,
    generator: Arc<dyn MetricGenerator>,
}

impl Validation {
    /// Creates a validation that computes its metric with `generator`.
    pub fn new(definition: ValidationDefinition, generator: impl MetricGenerator + 'static) -> Self {
        Self::with_shared_generator(definition, Arc::new(generator))
    }

    /// Creates a validation from a generator shared with other validations.
    pub fn with_shared_generator(
        definition: ValidationDefinition,
        generator: Arc<dyn MetricGenerator>,
    ) -> Self {
        Self {
            definition,
            generator,
        }
    }

    /// Returns the definition.
    pub fn definition(&self) -> &ValidationDefinition {
        &self.definition
    }

    /// Returns the validation name.
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the stable identity of this validation.
    pub fn validation_identity(&self) -> String {
        self.definition.validation_identity()
    }

    /// Evaluates the validation without failure containment.
    pub async fn try_evaluate(&self, ctx: &EvaluationContext) -> Result<ValidationInfo> {
        let metric_value = self
            .generator
            .generate_metric_value(&self.definition, ctx)
            .await?;
        Ok(self.definition.build_info(metric_value))
    }

    /// Evaluates the validation.
    ///
    /// Returns `None` if the metric could not be computed. The failure is
    /// logged at ERROR level with its full error chain and never propagated.
    #[instrument(skip(self, ctx), fields(
        validation.name = %self.definition.name(),
        validation.function = %self.definition.validation_function()
    ))]
    pub async fn evaluate(&self, ctx: &EvaluationContext) -> Option<ValidationInfo> {
        let info = self.definition.contain(self.try_evaluate(ctx)).await?;
        debug!(
            validation.identity = %info.identity,
            metric.value = info.value,
            validation.is_valid = ?info.is_valid,
            validation.reason = ?info.reason,
            "Validation evaluated"
        );
        Some(info)
    }
}

/// A validation unit of any kind.
///
/// Lets callers keep single-source and delta validations in one collection
/// and evaluate them uniformly.
#[async_trait]
pub trait ValidationUnit: Debug + Send + Sync {
    /// Returns the validation name.
    fn name(&self) -> &str;

    /// Returns the stable identity of the validation.
    fn validation_identity(&self) -> String;

    /// Evaluates the validation, returning `None` on a contained failure.
    async fn evaluate_unit(&self, ctx: &EvaluationContext) -> Option<ValidationRecord>;
}

/// A boxed validation unit for use in collections.
pub type BoxedValidationUnit = Box<dyn ValidationUnit>;

#[async_trait]
impl ValidationUnit for Validation {
    fn name(&self) -> &str {
        self.definition.name()
    }

    fn validation_identity(&self) -> String {
        self.definition.validation_identity()
    }

    async fn evaluate_unit(&self, ctx: &EvaluationContext) -> Option<ValidationRecord> {
        self.evaluate(ctx).await.map(ValidationRecord::from)
    }
}
