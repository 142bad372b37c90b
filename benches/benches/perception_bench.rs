//! # Perception Benchmarks
//!
//! Measures neighbor extraction from the range image and obstacle
//! clustering. Clustering is O(P²) in the candidate point count.
//!
//! Run: `cargo bench --bench perception_bench`

use chuha_core::prelude::*;
use chuha_swarm::tracker::extract_positions;
use chuha_swarm::{DetectionConfig, ObstacleDetector, cluster_points};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f64::consts::TAU;

fn painted_scan(robots: usize) -> RangeScan {
    let cal = Calibration::default();
    let mut scan = RangeScan::ambient(&cal, DEFAULT_SECTORS);
    for i in 0..robots {
        let theta = i as f64 * TAU / robots as f64;
        scan.paint_disc(Vec2::from_polar(0.2 + 0.05 * (i % 4) as f64, theta), 0.035);
    }
    scan
}

/// Filtro + segmentação + centróides
fn bench_extract_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_positions");
    let detection = DetectionConfig::default();
    let cal = detection.calibration();

    for robots in [0usize, 4, 12] {
        let scan = painted_scan(robots);
        group.bench_with_input(BenchmarkId::from_parameter(robots), &robots, |b, _| {
            b.iter(|| black_box(extract_positions(black_box(&scan), &detection, &cal, 0.6)))
        });
    }

    group.finish();
}

/// Candidatos + exclusão de vizinhos + agrupamento
fn bench_obstacles(c: &mut Criterion) {
    let mut group = c.benchmark_group("obstacles");
    let detector = ObstacleDetector::new(&DetectionConfig::default());

    let mut scan = painted_scan(4);
    scan.paint_disc(Vec2::new(0.7, 0.1), 0.08);
    scan.paint_disc(Vec2::new(-0.6, -0.4), 0.08);
    let neighbors: Vec<Agent> = extract_positions(&scan, &DetectionConfig::default(), &Calibration::default(), 0.6)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Agent::observed(format!("neighbor_{}", i), p))
        .collect();

    group.bench_function("detect", |b| {
        b.iter(|| black_box(detector.detect(black_box(&scan), &neighbors)))
    });

    for n in [16usize, 128, 512] {
        let points: Vec<Vec2> = (0..n)
            .map(|i| Vec2::from_polar(0.5 + 0.001 * i as f64, i as f64 * TAU / n as f64))
            .collect();
        group.bench_with_input(BenchmarkId::new("cluster_points", n), &points, |b, points| {
            b.iter(|| black_box(cluster_points(black_box(points), 0.15)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_positions, bench_obstacles);
criterion_main!(benches);
