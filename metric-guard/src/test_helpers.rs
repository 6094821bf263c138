//! Shared fixtures for unit tests: in-memory data sources and metric hooks.

use crate::core::{
    DataSource, DataSourceLanguageSupport, DeltaValidation, EvaluationContext, MetricGenerator,
    ReferenceMetricGenerator, ValidationDefinition,
};
use crate::error::{GuardError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A data source with a fixed name and dialect.
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    name: String,
    dialect: DataSourceLanguageSupport,
}

impl StaticDataSource {
    pub fn new(name: impl Into<String>, dialect: DataSourceLanguageSupport) -> Self {
        Self {
            name: name.into(),
            dialect,
        }
    }
}

impl DataSource for StaticDataSource {
    fn data_source_name(&self) -> &str {
        &self.name
    }

    fn language_support(&self) -> DataSourceLanguageSupport {
        self.dialect
    }
}

/// A SQL data source handle.
pub fn sql_source(name: &str) -> Arc<dyn DataSource> {
    Arc::new(StaticDataSource::new(name, DataSourceLanguageSupport::Sql))
}

/// Always returns the same metric.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetric(pub f64);

#[async_trait]
impl MetricGenerator for FixedMetric {
    async fn generate_metric_value(
        &self,
        _validation: &ValidationDefinition,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        Ok(self.0)
    }
}

/// Always fails with a data source error.
#[derive(Debug, Clone)]
pub struct FailingMetric {
    message: String,
}

impl FailingMetric {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl MetricGenerator for FailingMetric {
    async fn generate_metric_value(
        &self,
        validation: &ValidationDefinition,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        Err(GuardError::metric_computation_with_source(
            validation.name(),
            "query failed",
            Box::new(GuardError::data_source("sql", self.message.clone())),
        ))
    }
}

/// Panics instead of returning.
#[derive(Debug, Clone, Copy)]
pub struct PanickingMetric;

#[async_trait]
impl MetricGenerator for PanickingMetric {
    async fn generate_metric_value(
        &self,
        _validation: &ValidationDefinition,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        panic!("driver crashed")
    }
}

/// Returns the `offset` context parameter and counts calls.
#[derive(Debug, Clone, Default)]
pub struct CountingMetric {
    calls: Arc<AtomicUsize>,
}

impl CountingMetric {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricGenerator for CountingMetric {
    async fn generate_metric_value(
        &self,
        _validation: &ValidationDefinition,
        ctx: &EvaluationContext,
    ) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.get_f64("offset")
            .ok_or_else(|| GuardError::Internal("missing offset".to_string()))
    }
}

/// Returns preset source and reference metrics, or preset failures.
#[derive(Debug, Clone)]
pub struct PairMetric {
    source: std::result::Result<f64, &'static str>,
    reference: std::result::Result<f64, &'static str>,
}

impl PairMetric {
    pub fn new(
        source: std::result::Result<f64, &'static str>,
        reference: std::result::Result<f64, &'static str>,
    ) -> Self {
        Self { source, reference }
    }
}

#[async_trait]
impl MetricGenerator for PairMetric {
    async fn generate_metric_value(
        &self,
        validation: &ValidationDefinition,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        self.source
            .map_err(|message| GuardError::metric_computation(validation.name(), message))
    }
}

#[async_trait]
impl ReferenceMetricGenerator for PairMetric {
    async fn generate_reference_metric_value(
        &self,
        validation: &DeltaValidation,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        self.reference
            .map_err(|message| GuardError::metric_computation(validation.name(), message))
    }
}
