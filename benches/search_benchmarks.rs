use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use statewalk::{
    examples::counter::CounterState,
    solver::{bfs::BfsSolver, dfs::DfsSolver, engine::PuzzleSolver},
};

fn bench_bfs_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs_counter");

    for target in [7i64, 100] {
        group.bench_with_input(BenchmarkId::new("exact", target), &target, |b, &target| {
            b.iter(|| {
                let solver = BfsSolver::new();
                black_box(solver.solution(CounterState::new(1, target)).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("bloom", target), &target, |b, &target| {
            b.iter(|| {
                let solver = BfsSolver::sized(10_000, 0.0001);
                black_box(solver.solution(CounterState::new(1, target)).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_parallel_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs_counter_parallel");

    for parallel in [false, true] {
        group.bench_with_input(
            BenchmarkId::from_parameter(parallel),
            &parallel,
            |b, &parallel| {
                b.iter(|| {
                    let solver = BfsSolver::new().parallel(parallel);
                    black_box(solver.solution(CounterState::new(1, 100)).unwrap())
                })
            },
        );
    }

    group.finish();
}

fn bench_dfs(c: &mut Criterion) {
    c.bench_function("dfs_counter_depth_20", |b| {
        b.iter(|| {
            let solver = DfsSolver::new();
            black_box(solver.solution(CounterState::new(1, 7)).unwrap())
        })
    });
}

criterion_group!(benches, bench_bfs_filters, bench_parallel_filtering, bench_dfs);
criterion_main!(benches);
