//! Benchmarks for coefficient synthesis and response evaluation
//!
//! Run with: cargo bench -p pole-zero-workbench-core --bench recompute

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use pole_zero_workbench::model::multiset::conjugate_batch;
use pole_zero_workbench::{DefaultFilterConfig, FilterKind, FilterMode, FilterModel, ResponseKind};
use std::num::NonZeroU32;

/// Model with `pairs` complex pole pairs inside the unit circle
fn model_with_pairs(mode: FilterMode, pairs: usize) -> FilterModel {
    let config = DefaultFilterConfig::embedded().expect("embedded config");
    let mut model = FilterModel::from_default(&config, mode, FilterKind::Manual).expect("manual model");
    for i in 0..pairs {
        let angle = std::f64::consts::PI * (i as f64 + 0.5) / pairs as f64;
        let root = match mode {
            FilterMode::Digital => Complex64::from_polar(0.9, angle),
            FilterMode::Analog => Complex64::new(-0.1 - i as f64 * 0.05, 1.0 + i as f64),
        };
        model.add_poles(conjugate_batch(root, NonZeroU32::MIN));
    }
    model
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");

    for pairs in [1usize, 4, 16] {
        for mode in [FilterMode::Digital, FilterMode::Analog] {
            let mut model = model_with_pairs(mode, pairs);
            group.bench_with_input(BenchmarkId::new(mode.label(), pairs), &pairs, |b, _| {
                b.iter(|| {
                    model.recompute_coefficients().expect("coefficients");
                    model.recompute_response().expect("response");
                    black_box(model.complex_response().len())
                })
            });
        }
    }

    group.finish();
}

fn bench_time_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_response");

    for mode in [FilterMode::Digital, FilterMode::Analog] {
        let mut model = model_with_pairs(mode, 4);
        model.recompute_coefficients().expect("coefficients");
        group.bench_function(mode.label(), |b| {
            b.iter(|| black_box(model.time_response(ResponseKind::Step).expect("step")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recompute, bench_time_response);
criterion_main!(benches);
