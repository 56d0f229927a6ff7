use cad_units::{
    angular, encode_decimal, linear, AngularUnit, FormatRegistry, FormattingContext, LinearUnit,
    PartialConfig, Precision, ZeroSuppression,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn precision(value: u32) -> Precision {
    Precision::new(value).unwrap()
}

fn benchmark_decimal_cached_vs_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal");
    let registry = FormatRegistry::new();
    let ctx = FormattingContext::new();
    registry.format_decimal(1.0, &ctx).unwrap();

    group.bench_function("registry_cached", |b| {
        b.iter(|| registry.format_decimal(black_box(1234567.891), &ctx))
    });
    group.bench_function("encode_fresh", |b| {
        b.iter(|| encode_decimal(black_box(1234567.891), precision(2), "en-US", true))
    });
    group.finish();
}

fn benchmark_linear_encoders(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");
    let none = ZeroSuppression::none();
    let p = precision(3);

    group.bench_function("scientific", |b| {
        b.iter(|| linear::scientific(black_box(15.5), p))
    });
    group.bench_function("engineering", |b| {
        b.iter(|| linear::engineering(black_box(15.5), p, &none))
    });
    group.bench_function("architectural", |b| {
        b.iter(|| linear::architectural(black_box(15.5), p, &none))
    });
    group.bench_function("fractional", |b| {
        b.iter(|| linear::fractional(black_box(15.5), p))
    });
    group.finish();
}

fn benchmark_angular_encoders(c: &mut Criterion) {
    let mut group = c.benchmark_group("angular");
    let p = precision(2);

    group.bench_function("dms", |b| b.iter(|| angular::dms(black_box(123.456), p)));
    group.bench_function("surveyor", |b| {
        b.iter(|| angular::surveyor(black_box(223.456), p))
    });
    group.bench_function("grads", |b| b.iter(|| angular::grads(black_box(123.456), p)));
    group.finish();
}

fn benchmark_registry_units(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_linear");
    let registry = FormatRegistry::new();

    for unit in [
        LinearUnit::Decimal,
        LinearUnit::Scientific,
        LinearUnit::Engineering,
        LinearUnit::Architectural,
        LinearUnit::Fractional,
    ] {
        let ctx = FormattingContext::new()
            .with_linear_unit(unit)
            .with_suppress_zeros(true);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{unit:?}")), &ctx, |b, ctx| {
            b.iter(|| registry.format_linear(black_box(1234.5625), ctx))
        });
    }
    group.finish();

    let ctx = FormattingContext::new().with_angular_unit(AngularUnit::Surveyor);
    c.bench_function("registry_angle_surveyor", |b| {
        b.iter(|| registry.format_angular(black_box(301.25), &ctx))
    });
}

fn benchmark_update_config(c: &mut Criterion) {
    let registry = FormatRegistry::new();
    let update = PartialConfig {
        locale: Some("el-GR".to_string()),
        ..Default::default()
    };

    c.bench_function("update_then_format", |b| {
        b.iter(|| {
            registry.update_config(black_box(&update));
            registry.format_distance(black_box(1234.5), None)
        })
    });
}

criterion_group!(
    benches,
    benchmark_decimal_cached_vs_fresh,
    benchmark_linear_encoders,
    benchmark_angular_encoders,
    benchmark_registry_units,
    benchmark_update_config
);
criterion_main!(benches);
