//! Benchmarks for validation evaluation overhead.
//!
//! The metric hooks return constants, so these numbers measure the kernel
//! itself: identity derivation, threshold checks and record assembly.

use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use metric_guard::core::{
    DataSource, DataSourceLanguageSupport, DeltaValidation, EvaluationContext, MetricGenerator,
    ReferenceDataset, ReferenceMetricGenerator, Threshold, Validation, ValidationConfig,
    ValidationDefinition, ValidationFunction, ValidationIdentity,
};
use metric_guard::error::{GuardError, Result};
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Debug)]
struct Warehouse;

impl DataSource for Warehouse {
    fn data_source_name(&self) -> &str {
        "warehouse"
    }

    fn language_support(&self) -> DataSourceLanguageSupport {
        DataSourceLanguageSupport::Sql
    }
}

#[derive(Debug)]
struct Constant(f64);

#[async_trait]
impl MetricGenerator for Constant {
    async fn generate_metric_value(
        &self,
        _validation: &ValidationDefinition,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        Ok(self.0)
    }
}

#[async_trait]
impl ReferenceMetricGenerator for Constant {
    async fn generate_reference_metric_value(
        &self,
        _validation: &DeltaValidation,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        Ok(self.0 / 2.0)
    }
}

#[derive(Debug)]
struct Failing;

#[async_trait]
impl MetricGenerator for Failing {
    async fn generate_metric_value(
        &self,
        validation: &ValidationDefinition,
        _ctx: &EvaluationContext,
    ) -> Result<f64> {
        Err(GuardError::metric_computation(validation.name(), "timeout"))
    }
}

fn definition(threshold: Option<Threshold>) -> ValidationDefinition {
    let mut config = ValidationConfig::new(ValidationFunction::CountNull);
    config.threshold = threshold;
    ValidationDefinition::new("email_nulls", config, Arc::new(Warehouse), "users")
        .unwrap()
        .with_field_name("email")
}

fn bench_identity(c: &mut Criterion) {
    c.bench_function("generate_identity", |b| {
        b.iter(|| {
            ValidationIdentity::generate_identity(
                black_box(ValidationFunction::CountNull),
                black_box("email_nulls"),
                black_box(Some("warehouse")),
                black_box(Some("users")),
                black_box(Some("email")),
            )
        })
    });
}

fn bench_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold_validate");

    let cases = vec![
        ("single_bound", Threshold::new().with_gte(10.0)),
        ("range", Threshold::new().with_gte(10.0).with_lte(20.0)),
        (
            "all_bounds",
            Threshold::new()
                .with_gte(0.0)
                .with_lte(100.0)
                .with_gt(-1.0)
                .with_lt(101.0)
                .with_eq(50.0),
        ),
    ];

    for (name, threshold) in cases {
        group.bench_with_input(BenchmarkId::new("pass", name), &threshold, |b, t| {
            b.iter(|| t.validate(black_box(15.0)))
        });
        group.bench_with_input(BenchmarkId::new("fail", name), &threshold, |b, t| {
            b.iter(|| t.validate(black_box(-5.0)))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let ctx = EvaluationContext::new();
    let mut group = c.benchmark_group("evaluate");

    let without_threshold = Validation::new(definition(None), Constant(15.0));
    group.bench_function("no_threshold", |b| {
        b.iter(|| rt.block_on(without_threshold.evaluate(black_box(&ctx))))
    });

    let with_threshold = Validation::new(
        definition(Some(Threshold::new().with_gte(10.0).with_lte(20.0))),
        Constant(15.0),
    );
    group.bench_function("with_threshold", |b| {
        b.iter(|| rt.block_on(with_threshold.evaluate(black_box(&ctx))))
    });

    let failing = Validation::new(definition(None), Failing);
    group.bench_function("contained_failure", |b| {
        b.iter(|| rt.block_on(failing.evaluate(black_box(&ctx))))
    });

    let delta = DeltaValidation::new(
        definition(Some(Threshold::new().with_lte(10.0))),
        ReferenceDataset::new(Arc::new(Warehouse), "users_replica"),
        Constant(15.0),
    );
    group.bench_function("delta", |b| {
        b.iter(|| rt.block_on(delta.evaluate(black_box(&ctx))))
    });

    group.finish();
}

criterion_group!(benches, bench_identity, bench_threshold, bench_evaluate);
criterion_main!(benches);
