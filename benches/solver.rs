//! Benchmarks for the packing solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use packer::geometry::distinct_rotations;
use packer::pieces::PieceCatalog;
use packer::{solve, Solver};

/// Benchmark a packing that needs backtracking to succeed.
fn bench_solve_with_backtracking(c: &mut Criterion) {
    c.bench_function("solve_4x4_backtracking", |b| {
        b.iter(|| solve(black_box(4), black_box(&[7, 8, 6, 6])))
    });
}

/// Benchmark a full tiling of a 4x4 board with T pieces.
fn bench_solve_tiling(c: &mut Criterion) {
    c.bench_function("solve_4x4_t_tiling", |b| {
        b.iter(|| solve(black_box(4), black_box(&[9, 9, 9, 9])))
    });
}

/// Benchmark an exhaustive search that finds nothing.
fn bench_solve_exhausted(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhausted");
    group.sample_size(20);
    group.bench_function("solve_4x4_mixed_tetrominoes", |b| {
        let solver = Solver::new(PieceCatalog::standard());
        b.iter(|| solver.solve(black_box(4), black_box(&[9, 10, 11, 6])))
    });
    group.finish();
}

/// Benchmark computing the distinct rotations of a shape.
fn bench_distinct_rotations(c: &mut Criterion) {
    let shape = PieceCatalog::standard().shape_of(11).unwrap();

    c.bench_function("distinct_rotations", |b| {
        b.iter(|| distinct_rotations(black_box(shape)))
    });
}

/// Benchmark formatting a board for display.
fn bench_format_board(c: &mut Criterion) {
    let solution = solve(4, &[7, 8, 6, 6]).unwrap();

    c.bench_function("format_board", |b| {
        b.iter(|| black_box(&solution.board).to_string())
    });
}

criterion_group!(
    benches,
    bench_solve_with_backtracking,
    bench_solve_tiling,
    bench_solve_exhausted,
    bench_distinct_rotations,
    bench_format_board
);
criterion_main!(benches);
