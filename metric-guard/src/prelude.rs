//! Prelude for commonly used types and traits in metric-guard.

pub use crate::core::{
    DataSource, DataSourceLanguageSupport, DeltaValidation, DeltaValidationInfo,
    EvaluationContext, MetricGenerator, ReferenceDataset, ReferenceMetricGenerator, Threshold,
    Validation, ValidationConfig, ValidationDefinition, ValidationFunction, ValidationInfo,
    ValidationRecord, ValidationUnit,
};
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::logging::setup::LoggingConfig;
