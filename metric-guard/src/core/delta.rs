//! Delta validations comparing a dataset against a reference dataset.

use super::{
    DataSource, DeltaValidationInfo, EvaluationContext, MetricGenerator, ValidationDefinition,
    ValidationRecord, ValidationUnit,
};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// The dataset a delta validation compares against.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    data_source: Arc<dyn DataSource>,
    dataset_name: String,
    field_name: Option<String>,
}

impl ReferenceDataset {
    /// Creates a reference to `dataset_name` on `data_source`.
    pub fn new(data_source: Arc<dyn DataSource>, dataset_name: impl Into<String>) -> Self {
        Self {
            data_source,
            dataset_name: dataset_name.into(),
            field_name: None,
        }
    }

    /// Scopes the reference side to a single field.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Returns the reference data source handle.
    pub fn data_source(&self) -> &Arc<dyn DataSource> {
        &self.data_source
    }

    /// Returns the reference data source name.
    pub fn data_source_name(&self) -> &str {
        self.data_source.data_source_name()
    }

    /// Returns the reference dataset name.
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    /// Returns the reference field name, if any.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }
}

/// Computes the reference-side metric of a delta validation.
///
/// The source-side metric comes from the [`MetricGenerator`] supertrait, so a
/// single implementation supplies both sides of the comparison.
#[async_trait]
pub trait ReferenceMetricGenerator: MetricGenerator {
    /// Computes the same logical metric against the reference dataset.
    async fn generate_reference_metric_value(
        &self,
        validation: &DeltaValidation,
        ctx: &EvaluationContext,
    ) -> Result<f64>;
}

/// A validation whose metric is the absolute difference between the metric
/// of a dataset and the same metric on a reference dataset.
///
/// The threshold is evaluated against that difference, never against either
/// raw value. If either side fails the whole evaluation reports no result;
/// a partial record is never produced.
#[derive(Debug, Clone)]
pub struct DeltaValidation {
    definition: ValidationDefinition,
    reference: ReferenceDataset,
    generator: Arc<dyn ReferenceMetricGenerator>,
}

impl DeltaValidation {
    /// Creates a delta validation of `definition` against `reference`.
    pub fn new(
        definition: ValidationDefinition,
        reference: ReferenceDataset,
        generator: impl ReferenceMetricGenerator + 'static,
    ) -> Self {
        Self {
            definition,
            reference,
            generator: Arc::new(generator),
        }
    }

    /// Returns the source-side definition.
    pub fn definition(&self) -> &ValidationDefinition {
        &self.definition
    }

    /// Returns the reference dataset.
    pub fn reference(&self) -> &ReferenceDataset {
        &self.reference
    }

    /// Returns the validation name.
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the stable identity of this validation.
    pub fn validation_identity(&self) -> String {
        self.definition.validation_identity()
    }

    /// Evaluates the delta validation without failure containment.
    pub async fn try_evaluate(&self, ctx: &EvaluationContext) -> Result<DeltaValidationInfo> {
        let metric_value = self
            .generator
            .generate_metric_value(&self.definition, ctx)
            .await?;
        let reference_metric_value = self
            .generator
            .generate_reference_metric_value(self, ctx)
            .await?;
        let delta_value = (metric_value - reference_metric_value).abs();

        Ok(DeltaValidationInfo {
            info: self.definition.build_info(delta_value),
            source_value: metric_value,
            reference_value: reference_metric_value,
            reference_datasource_name: self.reference.data_source_name().to_string(),
            reference_dataset: self.reference.dataset_name.clone(),
        })
    }

    /// Evaluates the delta validation.
    ///
    /// Returns `None` if either metric could not be computed; the failure is
    /// logged and never propagated.
    #[instrument(skip(self, ctx), fields(
        validation.name = %self.definition.name(),
        validation.function = %self.definition.validation_function(),
        reference.dataset = %self.reference.dataset_name
    ))]
    pub async fn evaluate(&self, ctx: &EvaluationContext) -> Option<DeltaValidationInfo> {
        let delta = self.definition.contain(self.try_evaluate(ctx)).await?;
        debug!(
            validation.identity = %delta.info.identity,
            metric.value = delta.info.value,
            metric.source_value = delta.source_value,
            metric.reference_value = delta.reference_value,
            validation.is_valid = ?delta.info.is_valid,
            "Delta validation evaluated"
        );
        Some(delta)
    }
}

#[async_trait]
impl ValidationUnit for DeltaValidation {
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
