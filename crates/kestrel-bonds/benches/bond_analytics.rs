//! Benchmarks for bond pricing, YTM and risk measures.
//!
//! Run with: cargo bench -p kestrel-bonds

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use kestrel_bonds::prelude::*;

fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_from_yield");

    for (label, freq, years) in [
        ("10y_semi", Frequency::SemiAnnual, 10.0),
        ("30y_monthly", Frequency::Monthly, 30.0),
    ] {
        let bond = BondParams::new(1000.0, 0.05, years, freq).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(label), &bond, |b, bond| {
            b.iter(|| price_from_yield(black_box(bond), black_box(0.06)))
        });
    }

    group.finish();
}

fn bench_ytm(c: &mut Criterion) {
    let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
    let price = price_from_yield(&bond, 0.0637).unwrap();

    c.bench_function("yield_to_maturity", |b| {
        b.iter(|| yield_to_maturity(black_box(&bond), black_box(price)))
    });
}

fn bench_analytics(c: &mut Criterion) {
    let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();

    c.bench_function("analyze", |b| b.iter(|| analyze(black_box(&bond), 0.06)));
    c.bench_function("estimate_price_change", |b| {
        b.iter(|| estimate_price_change(black_box(&bond), 0.06, 0.01, true))
    });
}

fn bench_curve(c: &mut Criterion) {
    let curve = YieldCurve::reference().unwrap();

    c.bench_function("interpolate_yield", |b| {
        b.iter(|| curve.interpolate_yield(black_box(6.3)))
    });
    c.bench_function("forward_curve", |b| b.iter(|| black_box(&curve).forward_curve()));
}

criterion_group!(benches, bench_pricing, bench_ytm, bench_analytics, bench_curve);
criterion_main!(benches);
