// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridwall::geometry::{build_prism, merge};
use gridwall::grid::threshold;
use gridwall::{convert, ConversionParams, MapMetadata, OccupiedCell, Raster};
use nalgebra::Vector2;

/// Square map with a border wall and a sparse checker of pillars.
fn synthetic_map(size: usize) -> Raster {
    let mut raster = Raster::filled(size, size, 254);
    for i in 0..size {
        assert!(raster.set(0, i, 0));
        assert!(raster.set(size - 1, i, 0));
        assert!(raster.set(i, 0, 0));
        assert!(raster.set(i, size - 1, 0));
    }
    for row in (4..size - 4).step_by(8) {
        for col in (4..size - 4).step_by(8) {
            assert!(raster.set(row, col, 0));
            assert!(raster.set(row, col + 1, 0));
        }
    }
    raster
}

fn metadata() -> MapMetadata {
    MapMetadata::new("bench.pgm", 0.05, Vector2::new(-10.0, -10.0)).unwrap()
}

fn bench_threshold(c: &mut Criterion) {
    let raster = synthetic_map(512);
    c.bench_function("threshold_512", |b| {
        b.iter(|| threshold(black_box(&raster), black_box(105)))
    });
}

fn bench_prism(c: &mut Criterion) {
    let metadata = metadata();
    c.bench_function("build_prism", |b| {
        b.iter(|| build_prism(black_box(OccupiedCell::new(17, 42)), &metadata, 0.6).unwrap())
    });
}

fn bench_merge(c: &mut Criterion) {
    let metadata = metadata();
    let prisms: Vec<_> = (0..64)
        .flat_map(|row| (0..64).map(move |col| OccupiedCell::new(row, col)))
        .map(|cell| build_prism(cell, &metadata, 0.6).unwrap())
        .collect();

    c.bench_function("merge_64x64_block", |b| b.iter(|| merge(black_box(&prisms)).unwrap()));
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let metadata = metadata();

    for size in [128, 512] {
        let raster = synthetic_map(size);
        for parallel in [false, true] {
            let params = ConversionParams {
                parallel,
                ..ConversionParams::default()
            };
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, size), &raster, |b, raster| {
                b.iter(|| convert(black_box(raster), &metadata, &params).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_threshold, bench_prism, bench_merge, bench_convert);
criterion_main!(benches);
