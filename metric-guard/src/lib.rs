//! # metric-guard - the evaluation kernel of a data quality framework
//!
//! metric-guard defines what a single data quality check is and how it is
//! evaluated: a metric is computed against a data source (or two, for delta
//! checks), compared with a threshold, and reported as a structured record
//! tagged with a stable identity. Building and running the actual queries is
//! left to dialect-specific [`core::MetricGenerator`] implementations.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use metric_guard::prelude::*;
//!
//! #[derive(Debug)]
//! struct Postgres;
//!
//! impl DataSource for Postgres {
//!     fn data_source_name(&self) -> &str { "postgres" }
//!     fn language_support(&self) -> DataSourceLanguageSupport { DataSourceLanguageSupport::Sql }
//! }
//!
//! #[derive(Debug)]
//! struct NullCount;
//!
//! #[async_trait]
//! impl MetricGenerator for NullCount {
//!     async fn generate_metric_value(
//!         &self,
//!         validation: &ValidationDefinition,
//!         _ctx: &EvaluationContext,
//!     ) -> Result<f64> {
//!         let _sql = format!(
//!             "SELECT COUNT(*) FROM {} WHERE {} IS NULL",
//!             validation.dataset_name(),
//!             validation.field_name().unwrap_or("*"),
//!         );
//!         Ok(0.0)
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let config = ValidationConfig::builder(ValidationFunction::CountNull)
//!     .threshold(Threshold::new().with_eq(0.0))
//!     .build();
//! let definition = ValidationDefinition::new("email_not_null", config, Arc::new(Postgres), "users")?
//!     .with_field_name("email");
//! let validation = Validation::new(definition, NullCount);
//!
//! match validation.evaluate(&EvaluationContext::new()).await {
//!     Some(info) if info.is_failure() => println!("{} failed: {:?}", info.identity, info.reason),
//!     Some(info) => println!("{} = {}", info.identity, info.value),
//!     None => println!("metric could not be computed, see logs"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure containment
//!
//! `evaluate()` never returns an error and never panics because of a metric
//! hook. Hook errors and panics are logged through `tracing` at ERROR level
//! and the call returns `None`, so a batch runner can move on to the next
//! validation.
//!
//! ## Architecture
//!
//! - **`core`**: identities, thresholds, configuration, validation units
//! - **`error`**: the [`error::GuardError`] type
//! - **`logging`**: subscriber setup helpers

pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;

#[cfg(test)]
pub mod test_helpers;
