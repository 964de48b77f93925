#![allow(clippy::all)]
//! Benchmarks for the measurement harness itself.
//!
//! Tests: pipeline vs execute-only overhead on a single participant, and
//! worker-group scaling of the barrier + max-reduction timing discipline.

mod common;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spmd_bench::comm::{CommContext, ProcessGroup, SingleProcess};
use spmd_bench::perf::{PerfConfig, PerfHarness};
use spmd_bench::task::BufferDescriptorSet;
use spmd_bench::tasks::row_sum::{RowSumPar, RowSumSeq};
use std::hint::black_box;

use common::generators::matrix_problem;
use common::report::{BenchReport, Measurement};

fn bench_modes_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("perf/modes");
    let problem = matrix_problem(64, 64);

    group.bench_function("pipeline_run", |b| {
        b.iter(|| {
            let mut sums = vec![0i64; 64];
            let buffers = BufferDescriptorSet::builder()
                .input(&problem.dims)
                .input(&problem.matrix)
                .output(&mut sums)
                .build();
            let ctx = SingleProcess::new();
            let mut task = RowSumSeq::new(buffers);
            let result = PerfHarness::new(&mut task, &ctx)
                .pipeline_run(&PerfConfig::new(10))
                .unwrap();
            black_box(result)
        });
    });

    group.bench_function("execute_run", |b| {
        b.iter(|| {
            let mut sums = vec![0i64; 64];
            let buffers = BufferDescriptorSet::builder()
                .input(&problem.dims)
                .input(&problem.matrix)
                .output(&mut sums)
                .build();
            let ctx = SingleProcess::new();
            let mut task = RowSumSeq::new(buffers);
            let result = PerfHarness::new(&mut task, &ctx)
                .execute_run(&PerfConfig::new(10))
                .unwrap();
            black_box(result)
        });
    });

    group.finish();
}

fn bench_group_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("perf/group_scaling");
    group.sample_size(10);
    let problem = matrix_problem(128, 128);

    for size in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let workers = ProcessGroup::new(size);
                let results = workers.run(|ctx| {
                    let mut sums = vec![0i64; 128];
                    let buffers = if ctx.is_coordinator() {
                        BufferDescriptorSet::builder()
                            .input(&problem.dims)
                            .input(&problem.matrix)
                            .output(&mut sums)
                            .build()
                    } else {
                        BufferDescriptorSet::empty()
                    };
                    let mut task = RowSumPar::new(buffers, &ctx);
                    PerfHarness::new(&mut task, &ctx)
                        .execute_run(&PerfConfig::new(5))
                        .unwrap()
                });
                black_box(results)
            });
        });
    }
    group.finish();
}

/// One direct harness pass per configuration, collected into the custom
/// report for CI artifacts.
fn emit_report() {
    let mut report = BenchReport::new("perf_modes");
    let problem = matrix_problem(64, 64);

    for size in [1usize, 2, 4] {
        let workers = ProcessGroup::new(size);
        let results = workers.run(|ctx| {
            let mut sums = vec![0i64; 64];
            let buffers = if ctx.is_coordinator() {
                BufferDescriptorSet::builder()
                    .input(&problem.dims)
                    .input(&problem.matrix)
                    .output(&mut sums)
                    .build()
            } else {
                BufferDescriptorSet::empty()
            };
            let mut task = RowSumPar::new(buffers, &ctx);
            PerfHarness::new(&mut task, &ctx)
                .execute_run(&PerfConfig::new(20))
                .unwrap()
        });
        report.add(Measurement::new("row_sum_par", "group_scaling", results[0].clone()));
    }

    println!("{}", report.summary());
}

fn bench_all(c: &mut Criterion) {
    bench_modes_single(c);
    bench_group_scaling(c);
    emit_report();
}

criterion_group!(benches, bench_all);
criterion_main!(benches);
