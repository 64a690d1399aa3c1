//! Benchmarks for tanh-sinh integration.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use dequad_float::{BigFloatContext, F64Context, RealContext};
use dequad_integrate::{tanh_sinh, Derivatives, NodeSet, TanhSinh, TanhSinhOptions, DEFAULT_MAX_STEPS};

fn bench_double_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("tanh_sinh_f64");

    group.bench_function("exp", |b| {
        b.iter(|| tanh_sinh(|x| x.exp(), black_box(0.0), black_box(1.0), 1e-10, DEFAULT_MAX_STEPS))
    });
    group.bench_function("inv_sqrt", |b| {
        b.iter(|| tanh_sinh(|x| 1.0 / x.sqrt(), black_box(0.0), black_box(1.0), 1e-10, DEFAULT_MAX_STEPS))
    });

    let ts = TanhSinh::<F64Context>::new(TanhSinhOptions::new(1e-10)).unwrap();
    let exp = |x: &f64| x.exp();
    let derivatives = Derivatives::new(exp, exp);
    group.bench_function("exp_with_derivatives", |b| {
        b.iter(|| ts.integrate_with_derivatives(exp, &derivatives, black_box(&0.0), black_box(&1.0)))
    });

    group.finish();
}

fn bench_big_float(c: &mut Criterion) {
    let mut group = c.benchmark_group("tanh_sinh_bigfloat");
    group.sample_size(10);

    for digits in [20, 30, 50] {
        let eps = 10f64.powi(-digits);
        let ts = TanhSinh::<BigFloatContext>::new(TanhSinhOptions::new(eps)).unwrap();
        let ctx = ts.context().clone();
        let (a, b) = (ctx.zero(), ctx.one());

        group.bench_with_input(BenchmarkId::new("exp", digits), &digits, |bench, _| {
            bench.iter(|| black_box(ts.integrate(|x| ctx.exp(x), &a, &b)))
        });
    }

    group.finish();
}

fn bench_node_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_set");
    let ctx = F64Context::default();

    for level in [4u32, 8, 10] {
        let h = 0.5f64.powi(level as i32 + 1);
        group.bench_with_input(BenchmarkId::new("sequential", level), &h, |b, h| {
            b.iter(|| NodeSet::generate(&ctx, black_box(h), &1e-12, usize::MAX))
        });
        group.bench_with_input(BenchmarkId::new("parallel", level), &h, |b, h| {
            b.iter(|| NodeSet::generate(&ctx, black_box(h), &1e-12, 1))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_double_precision, bench_big_float, bench_node_generation);
criterion_main!(benches);
