use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use woodpusher_agents::search;
use woodpusher_core::Board;

fn bench_search_depths(c: &mut Criterion) {
    let board = Board::starting_position();
    let mut group = c.benchmark_group("search_starting_position");

    for depth in [1u8, 2, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| search(black_box(&board), depth));
        });
    }

    group.finish();
}

fn bench_board_construction(c: &mut Criterion) {
    c.bench_function("starting_position", |b| {
        b.iter(|| black_box(Board::starting_position()));
    });
}

criterion_group!(benches, bench_search_depths, bench_board_construction);
criterion_main!(benches);
