//! Core validation types for the metric-guard evaluation kernel.
//!
//! ## Overview
//!
//! - **[`ValidationIdentity`]**: derives the stable dotted key of a validation
//! - **[`Threshold`]**: optional `gte`/`lte`/`gt`/`lt`/`eq` bounds, all of which must hold
//! - **[`ValidationDefinition`]**: configuration, data source and dialect-interpreted filters
//! - **[`Validation`]**: a definition plus a [`MetricGenerator`] hook
//! - **[`DeltaValidation`]**: compares a dataset with a [`ReferenceDataset`] through a
//!   [`ReferenceMetricGenerator`]
//!
//! ## Lifecycle
//!
//! ```text
//! Constructed ──evaluate()──▶ Evaluating ──┬──▶ Some(result)
//!      ▲                                   └──▶ None (failure logged)
//!      └───────────── no state kept between calls ─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use metric_guard::core::{
//!     DataSource, DataSourceLanguageSupport, EvaluationContext, MetricGenerator, Threshold,
//!     Validation, ValidationConfig, ValidationDefinition, ValidationFunction,
//! };
//! use metric_guard::error::Result;
//!
//! #[derive(Debug)]
//! struct Warehouse;
//!
//! impl DataSource for Warehouse {
//!     fn data_source_name(&self) -> &str { "warehouse" }
//!     fn language_support(&self) -> DataSourceLanguageSupport { DataSourceLanguageSupport::Sql }
//! }
//!
//! #[derive(Debug)]
//! struct RowCount;
//!
//! #[async_trait]
//! impl MetricGenerator for RowCount {
//!     async fn generate_metric_value(
//!         &self,
//!         _validation: &ValidationDefinition,
//!         _ctx: &EvaluationContext,
//!     ) -> Result<f64> {
//!         // Run `SELECT COUNT(*) FROM <dataset>` against the warehouse here.
//!         Ok(1_250.0)
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let config = ValidationConfig::builder(ValidationFunction::CountRows)
//!     .threshold(Threshold::new().with_gte(1_000.0))
//!     .build();
//! let definition = ValidationDefinition::new("orders_rows", config, Arc::new(Warehouse), "orders")?;
//! let validation = Validation::new(definition, RowCount);
//!
//! if let Some(info) = validation.evaluate(&EvaluationContext::new()).await {
//!     assert_eq!(info.identity, "warehouse.orders.count_rows.orders_rows");
//!     assert_eq!(info.is_valid, Some(true));
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod data_source;
mod delta;
mod function;
mod identity;
mod result;
mod threshold;
mod validation;

pub use config::{ValidationConfig, ValidationConfigBuilder, WhereFilter};
pub use context::EvaluationContext;
pub use data_source::{DataSource, DataSourceLanguageSupport};
pub use delta::{DeltaValidation, ReferenceDataset, ReferenceMetricGenerator};
pub use function::ValidationFunction;
pub use identity::ValidationIdentity;
pub use result::{DeltaValidationInfo, ValidationInfo, ValidationRecord};
pub use threshold::{ConditionType, Threshold};
pub use validation::{
    BoxedValidationUnit, MetricGenerator, Validation, ValidationDefinition, ValidationUnit,
};
