//! # SwarmController Benchmarks
//!
//! Measures one full control step: weights, behaviors, emergency, drive
//! mapping and smoothing. Cost grows linearly with the neighbor count.
//!
//! Run: `cargo bench --bench controller_bench`

use chuha_core::prelude::*;
use chuha_swarm::{SwarmConfig, SwarmController};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f64::consts::TAU;

fn ring(n: usize, radius: f64) -> Vec<Agent> {
    (0..n)
        .map(|i| Agent::observed(format!("neighbor_{}", i), Vec2::from_polar(radius, i as f64 * TAU / n as f64)))
        .collect()
}

/// Passo a partir de vizinhos já percebidos
fn bench_step_observed(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_observed");

    for n in [0usize, 3, 8, 32] {
        let neighbors = ring(n, 0.3);
        let obstacles = vec![Obstacle::new(0.0, 0.15), Obstacle::new(-0.1, -0.1)];
        let mut controller = match SwarmController::new("chuha_1", SwarmConfig::default()) {
            Ok(c) => c,
            Err(e) => panic!("default config rejected: {}", e),
        };

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(controller.step_observed(neighbors.clone(), obstacles.clone())))
        });
    }

    group.finish();
}

/// Passo completo a partir de uma varredura 16 × 512
fn bench_step_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_scan");

    let cal = Calibration::default();
    let mut scan = RangeScan::ambient(&cal, DEFAULT_SECTORS);
    scan.paint_disc(Vec2::new(0.3, 0.0), 0.035);
    scan.paint_disc(Vec2::new(-0.2, 0.2), 0.035);
    scan.paint_disc(Vec2::new(0.0, -0.35), 0.035);
    scan.paint_disc(Vec2::new(0.6, 0.4), 0.05);

    let mut controller = match SwarmController::new("chuha_1", SwarmConfig::default()) {
        Ok(c) => c,
        Err(e) => panic!("default config rejected: {}", e),
    };

    group.bench_function("three_robots_one_obstacle", |b| {
        b.iter(|| black_box(controller.step(Some(black_box(&scan)))))
    });

    group.bench_function("sensor_absent", |b| {
        b.iter(|| black_box(controller.step(None)))
    });

    group.finish();
}

criterion_group!(benches, bench_step_observed, bench_step_scan);
criterion_main!(benches);
