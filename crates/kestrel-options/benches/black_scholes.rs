//! Benchmarks for Black-Scholes pricing, Greeks and implied volatility.
//!
//! Run with: cargo bench -p kestrel-options

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use kestrel_options::prelude::*;

fn reference_call() -> OptionParams {
    OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, OptionKind::Call).unwrap()
}

fn bench_pricing(c: &mut Criterion) {
    let params = reference_call();

    c.bench_function("price", |b| b.iter(|| price(black_box(&params))));
    c.bench_function("greeks", |b| b.iter(|| greeks(black_box(&params))));
    c.bench_function("black_scholes", |b| {
        b.iter(|| black_scholes(black_box(&params)))
    });
}

fn bench_implied_vol(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_volatility");

    for sigma in [0.1, 0.3, 0.8] {
        let market = price(&reference_call().with_volatility(sigma).unwrap());
        group.bench_with_input(BenchmarkId::from_parameter(sigma), &market, |b, &m| {
            b.iter(|| {
                implied_volatility(black_box(m), 100.0, 105.0, 0.25, 0.05, OptionKind::Call)
            })
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_batch");

    for size in [100usize, 10_000] {
        let contracts: Vec<OptionParams> = (0..size)
            .map(|i| {
                let strike = 50.0 + (i % 100) as f64;
                OptionParams::new(100.0, strike, 0.5, 0.03, 0.25, OptionKind::Put).unwrap()
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &contracts, |b, batch| {
            b.iter(|| price_batch(black_box(batch)))
        });
    }

    group.finish();
}

fn bench_chart(c: &mut Criterion) {
    let params = reference_call();
    let grid = SampleGrid::new(50.0, 150.0, 200).unwrap();

    c.bench_function("greeks_vs_spot_201", |b| {
        b.iter(|| {
            greeks_vs_spot(black_box(&params), &grid)
                .unwrap()
                .map(|point| point.greeks.delta)
                .sum::<f64>()
        })
    });
}

criterion_group!(
    benches,
    bench_pricing,
    bench_implied_vol,
    bench_batch,
    bench_chart
);
criterion_main!(benches);
